use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::{SpanBackendWithUrl, TracingMiddleware};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Error returned by module registry lookups.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The (module, service) pair isn't known to the registry.
    #[error("service ('{service_id}') of module ('{module_id}') is not registered")]
    NotFound {
        module_id: String,
        service_id: String,
    },
    /// The registry could not be consulted.
    #[error("module registry request failed: {0}")]
    Unavailable(String),
}

/// Resolves a logical (module, service) pair to the concrete endpoint hosting it.
#[async_trait]
pub trait ModuleRegistry: Send + Sync + 'static {
    /// Resolves the base endpoint URL of the specified smart service.
    async fn resolve_service_endpoint(
        &self,
        module_id: &str,
        service_id: &str,
    ) -> Result<Url, RegistryError>;
}

/// Record returned by the registry lookup endpoint.
#[derive(Deserialize, Debug)]
struct ServiceEndpoint {
    url: Url,
}

/// Module registry hosted by the digital-twin middleware.
pub struct HttpModuleRegistry {
    registry_url: Url,
    client: ClientWithMiddleware,
}

impl HttpModuleRegistry {
    /// Creates a registry client resolving against the specified middleware URL.
    pub fn new(registry_url: Url, request_timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            registry_url,
            client: ClientBuilder::new(
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .build()?,
            )
            .with(TracingMiddleware::<SpanBackendWithUrl>::new())
            .build(),
        })
    }
}

#[async_trait]
impl ModuleRegistry for HttpModuleRegistry {
    async fn resolve_service_endpoint(
        &self,
        module_id: &str,
        service_id: &str,
    ) -> Result<Url, RegistryError> {
        let lookup_url = self
            .registry_url
            .join(&format!(
                "api/registry/modules/{module_id}/services/{service_id}"
            ))
            .map_err(|err| RegistryError::Unavailable(err.to_string()))?;

        let response = self
            .client
            .get(lookup_url)
            .send()
            .await
            .map_err(|err| RegistryError::Unavailable(err.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound {
                module_id: module_id.to_string(),
                service_id: service_id.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(RegistryError::Unavailable(format!(
                "registry responded with {}",
                response.status()
            )));
        }

        let endpoint = response
            .json::<ServiceEndpoint>()
            .await
            .map_err(|err| RegistryError::Unavailable(err.to_string()))?;

        Ok(endpoint.url)
    }
}
