use crate::provider::PollConfig;
use anyhow::{bail, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ProviderConfig {
    /// AssemblyAI credential; normally supplied through the
    /// ASSEMBLYAI_API_KEY environment variable (a local .env file works too)
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub poll: PollConfig,
}

impl Config {
    /// Load configuration from an optional TOML file, then let the
    /// environment supply the provider credential.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        let mut cfg: Config = settings.try_deserialize()?;

        if cfg.provider.api_key.is_empty() {
            if let Ok(key) = std::env::var("ASSEMBLYAI_API_KEY") {
                cfg.provider.api_key = key;
            }
        }

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            bail!("ASSEMBLYAI_API_KEY is not set");
        }
        if self.provider.poll.interval_secs == 0 {
            bail!("provider.poll.interval_secs must be at least 1");
        }
        if self.provider.poll.max_attempts == 0 {
            bail!("provider.poll.max_attempts must be at least 1");
        }
        Ok(())
    }
}
