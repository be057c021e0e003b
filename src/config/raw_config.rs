use crate::config::{AuthConfig, DatabaseConfig, DtmConfig, SchedulerConfig};
use figment::{providers, providers::Format, Figment};
use serde::{Deserialize, Serialize};

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RawConfig {
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Configuration of the digital-twin middleware invocations are sent to.
    pub dtm: DtmConfig,
    /// Configuration of the OAuth2 client-credentials flow.
    pub auth: AuthConfig,
    /// Configuration of the task scheduler.
    pub scheduler: SchedulerConfig,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(
            Figment::from(providers::Serialized::defaults(Self::default()))
                .merge(providers::Toml::file(path))
                .merge(providers::Env::prefixed("TWINPROBE_").split("__"))
                .extract()?,
        )
    }
}
