use serde::{Deserialize, Serialize};

/// Configuration for the database connection.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Name of the database to connect to.
    pub name: String,
    /// Hostname to use to connect to the database.
    pub host: String,
    /// Port to use to connect to the database.
    pub port: u16,
    /// Username to use to connect to the database.
    pub username: String,
    /// Optional password to use to connect to the database.
    pub password: Option<String>,
    /// Defines a maximum number of connections allowed.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: "twinprobe".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: None,
            max_connections: 100,
        }
    }
}
