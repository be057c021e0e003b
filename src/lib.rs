#![deny(warnings)]

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod invocation;
pub mod network;
pub mod scheduler;
pub mod tasks;

#[cfg(test)]
pub mod tests {
    use crate::{
        api::Api,
        config::{AuthConfig, Config, DatabaseConfig, DtmConfig, SchedulerConfig},
        network::{ModuleRegistry, Network, RegistryError, TokenProvider},
        tasks::MemoryTaskStore,
    };
    use async_trait::async_trait;
    use httpmock::{Method::POST, Mock, MockServer};
    use std::{collections::HashMap, time::Duration};
    use time::OffsetDateTime;
    use twinprobe_types::{
        invocation::{InvocationMode, InvocationRequest},
        scheduler::{Frequency, FrequencyUnit, ScheduledTask, ScheduledTaskCreateParams},
    };
    use url::Url;
    use uuid::Uuid;

    /// Module registry stub resolving endpoints from a static map.
    #[derive(Default)]
    pub struct MockModuleRegistry {
        endpoints: HashMap<(String, String), Url>,
        failure: Option<String>,
    }

    impl MockModuleRegistry {
        pub fn with_endpoint(mut self, module_id: &str, service_id: &str, url: Url) -> Self {
            self.endpoints
                .insert((module_id.to_string(), service_id.to_string()), url);
            self
        }

        pub fn failing(reason: &str) -> Self {
            Self {
                endpoints: HashMap::new(),
                failure: Some(reason.to_string()),
            }
        }
    }

    #[async_trait]
    impl ModuleRegistry for MockModuleRegistry {
        async fn resolve_service_endpoint(
            &self,
            module_id: &str,
            service_id: &str,
        ) -> Result<Url, RegistryError> {
            if let Some(ref reason) = self.failure {
                return Err(RegistryError::Unavailable(reason.clone()));
            }

            self.endpoints
                .get(&(module_id.to_string(), service_id.to_string()))
                .cloned()
                .ok_or_else(|| RegistryError::NotFound {
                    module_id: module_id.to_string(),
                    service_id: service_id.to_string(),
                })
        }
    }

    pub fn mock_config() -> anyhow::Result<Config> {
        Ok(Config {
            db: DatabaseConfig::default(),
            dtm: DtmConfig {
                url: Url::parse("http://localhost:1234/")?,
                invoke_timeout: Duration::from_secs(5),
            },
            auth: AuthConfig {
                token_url: Url::parse("http://localhost:1234/oauth/token")?,
                client_id: "twinprobe".to_string(),
                client_secret: "twinprobe-secret".to_string(),
            },
            scheduler: SchedulerConfig { enabled: true },
        })
    }

    /// Config pointing both the middleware and the identity provider at the mock server.
    pub fn mock_config_with_server(server: &MockServer) -> anyhow::Result<Config> {
        let mut config = mock_config()?;
        config.dtm.url = Url::parse(&server.base_url())?;
        config.auth.token_url = Url::parse(&server.url("/oauth/token"))?;
        Ok(config)
    }

    pub fn mock_api(
        config: Config,
        registry: MockModuleRegistry,
    ) -> anyhow::Result<Api<MemoryTaskStore, MockModuleRegistry>> {
        let timeout = config.dtm.invoke_timeout;
        let tokens = TokenProvider::new(config.auth.clone(), timeout)?;
        Ok(Api::new(
            config,
            MemoryTaskStore::default(),
            Network::new(registry, tokens, timeout)?,
        ))
    }

    /// Registers a token endpoint mock responding with a short-lived bearer token.
    pub fn mock_token_endpoint(server: &MockServer) -> Mock<'_> {
        server.mock(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "access_token": "some-token",
                    "token_type": "Bearer",
                    "expires_in": 300
                }));
        })
    }

    pub fn mock_invocation_request() -> InvocationRequest {
        InvocationRequest {
            module_id: "pump-station".to_string(),
            service_id: "threshold-analysis".to_string(),
            payload: serde_json::json!({ "sensor": "inflow" }),
            mode: InvocationMode::Sync,
        }
    }

    pub fn mock_create_params() -> ScheduledTaskCreateParams {
        ScheduledTaskCreateParams {
            module_id: "pump-station".to_string(),
            service_id: "threshold-analysis".to_string(),
            service_type: "threshold-based".to_string(),
            frequency: Frequency {
                unit: FrequencyUnit::Minutes,
                value: 30,
            },
            mode: InvocationMode::Sync,
            payload: serde_json::json!({ "sensor": "inflow" }),
            next_execution_time: None,
        }
    }

    pub fn mock_scheduled_task(id: Uuid) -> ScheduledTask {
        ScheduledTask {
            id,
            module_id: "pump-station".to_string(),
            service_id: "threshold-analysis".to_string(),
            service_type: "threshold-based".to_string(),
            frequency: Frequency {
                unit: FrequencyUnit::Minutes,
                value: 30,
            },
            mode: InvocationMode::Sync,
            payload: serde_json::json!({ "sensor": "inflow" }),
            created_at: OffsetDateTime::from_unix_timestamp(946720800).unwrap(),
            next_execution_time: OffsetDateTime::from_unix_timestamp(946722600).unwrap(),
        }
    }
}
