mod auth_config;
mod database_config;
mod dtm_config;
mod raw_config;
mod scheduler_config;

pub use self::{
    auth_config::AuthConfig, database_config::DatabaseConfig, dtm_config::DtmConfig,
    raw_config::RawConfig, scheduler_config::SchedulerConfig,
};

/// Main service config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Configuration of the digital-twin middleware invocations are sent to.
    pub dtm: DtmConfig,
    /// Configuration of the OAuth2 client-credentials flow.
    pub auth: AuthConfig,
    /// Configuration of the task scheduler.
    pub scheduler: SchedulerConfig,
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            db: raw_config.db,
            dtm: raw_config.dtm,
            auth: raw_config.auth,
            scheduler: raw_config.scheduler,
        }
    }
}
