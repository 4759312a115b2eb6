use serde::{Deserialize, Serialize};

/// A single utterance as returned by the transcription provider.
///
/// Timestamps are in milliseconds and the speaker label is provider-assigned
/// ("A", "B", ...). Both are provider-native details that do not survive
/// normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUtterance {
    pub text: String,
    pub speaker: String,

    /// Utterance start, milliseconds from the beginning of the audio
    pub start: u64,

    /// Utterance end, milliseconds from the beginning of the audio
    pub end: u64,
}

/// A transcript segment in the shape served to clients.
///
/// Timestamps are in seconds. Created once by [`normalize`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,

    /// Segment start, seconds
    pub start: f64,

    /// Segment end, seconds
    pub end: f64,
}

/// Convert provider-native utterances into public segments.
///
/// Pure scale conversion: divides start/end by 1000 and drops the speaker
/// label. Length and order of the input are preserved.
pub fn normalize(utterances: Vec<RawUtterance>) -> Vec<Segment> {
    utterances
        .into_iter()
        .map(|u| Segment {
            text: u.text,
            start: u.start as f64 / 1000.0,
            end: u.end as f64 / 1000.0,
        })
        .collect()
}
