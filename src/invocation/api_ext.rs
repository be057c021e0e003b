use crate::{
    api::Api,
    invocation::{InvocationError, InvocationFailure},
    network::{ModuleRegistry, RegistryError},
    tasks::TaskStore,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use twinprobe_types::invocation::{InvocationMode, InvocationRequest, RemoteResponse};
use url::Url;

/// Name of the header carrying the invocation mode.
pub const INVOCATION_MODE_HEADER: &str = "x-invocation-mode";

/// Describes the API to invoke smart services hosted by the digital-twin middleware.
pub struct InvocationApiExt<'a, TS: TaskStore, MR: ModuleRegistry> {
    api: &'a Api<TS, MR>,
}

impl<'a, TS: TaskStore, MR: ModuleRegistry> InvocationApiExt<'a, TS, MR> {
    /// Creates Invocation API.
    pub fn new(api: &'a Api<TS, MR>) -> Self {
        Self { api }
    }

    /// Invokes the smart service the request refers to. Synchronous invocations return
    /// the structured remote response; asynchronous invocations return `None` as soon as
    /// the middleware acknowledges the request at the transport level.
    pub async fn invoke(
        &self,
        request: &InvocationRequest,
    ) -> Result<Option<RemoteResponse>, InvocationError> {
        Self::validate_request(request)?;

        let endpoint = self.resolve_endpoint(request).await?;
        let token = self
            .api
            .network
            .tokens
            .acquire()
            .await
            .map_err(|err| InvocationError::Authentication {
                reason: format!("{err:#}"),
            })?;

        // The resolved endpoint hosts the service itself, the invocation route lives
        // right under it.
        let invoke_url = format!("{}/invoke", endpoint.as_str().trim_end_matches('/'));
        let response = self
            .api
            .network
            .client
            .post(&invoke_url)
            .bearer_auth(&token.value)
            .header(INVOCATION_MODE_HEADER, request.mode.as_str())
            .json(&request.payload)
            .send()
            .await
            .map_err(InvocationFailure::Transport)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            let failure = if status.is_client_error() {
                InvocationFailure::RemoteClient { status, body }
            } else {
                InvocationFailure::RemoteServer { status, body }
            };
            return Err(failure.into());
        }

        if let InvocationMode::Async = request.mode {
            debug!(
                invocation.module_id = %request.module_id,
                invocation.service_id = %request.service_id,
                "Successfully dispatched asynchronous invocation."
            );
            return Ok(None);
        }

        let body = response.text().await.map_err(|err| {
            InvocationFailure::Transport(reqwest_middleware::Error::Reqwest(err))
        })?;
        let remote_response = serde_json::from_str::<RemoteResponse>(&body)
            .map_err(InvocationError::ResponseDecoding)?;
        if !remote_response.success || !remote_response.is_completed() {
            return Err(InvocationError::RemoteExecution {
                execution_state: remote_response.execution_state,
            });
        }

        debug!(
            invocation.module_id = %request.module_id,
            invocation.service_id = %request.service_id,
            "Successfully executed synchronous invocation."
        );

        Ok(Some(remote_response))
    }

    /// Invokes the smart service synchronously and decodes its output arguments into the
    /// caller-specified type.
    pub async fn invoke_as<R: DeserializeOwned>(
        &self,
        request: &InvocationRequest,
    ) -> Result<R, InvocationError> {
        let Some(response) = self.invoke(request).await? else {
            // Asynchronous invocations deliver their result out-of-band and can never
            // produce a typed output.
            return Err(InvocationError::InvalidInvocation("mode"));
        };

        serde_json::from_value(response.output_arguments)
            .map_err(InvocationError::ResponseDecoding)
    }

    fn validate_request(request: &InvocationRequest) -> Result<(), InvocationError> {
        if request.service_id.trim().is_empty() {
            return Err(InvocationError::InvalidInvocation("serviceId"));
        }

        if request.module_id.trim().is_empty() {
            return Err(InvocationError::InvalidInvocation("moduleId"));
        }

        if request.payload.is_null() {
            return Err(InvocationError::InvalidInvocation("payload"));
        }

        Ok(())
    }

    async fn resolve_endpoint(
        &self,
        request: &InvocationRequest,
    ) -> Result<Url, InvocationError> {
        let endpoint = self
            .api
            .network
            .registry
            .resolve_service_endpoint(&request.module_id, &request.service_id)
            .await
            .map_err(|err| match err {
                RegistryError::NotFound {
                    module_id,
                    service_id,
                } => InvocationError::ModuleNotFound {
                    module_id,
                    service_id,
                },
                RegistryError::Unavailable(reason) => InvocationError::EndpointResolution {
                    module_id: request.module_id.clone(),
                    service_id: request.service_id.clone(),
                    reason,
                },
            })?;

        // A misconfigured or tampered registry must not redirect invocations off the
        // configured middleware host.
        let dtm_url = &self.api.config.dtm.url;
        let same_authority = endpoint.scheme() == dtm_url.scheme()
            && endpoint.host_str() == dtm_url.host_str()
            && endpoint.port_or_known_default() == dtm_url.port_or_known_default();
        if !same_authority {
            return Err(InvocationError::EndpointResolution {
                module_id: request.module_id.clone(),
                service_id: request.service_id.clone(),
                reason: format!(
                    "resolved endpoint ('{endpoint}') is not hosted by the configured middleware"
                ),
            });
        }

        Ok(endpoint)
    }
}

impl<TS: TaskStore, MR: ModuleRegistry> Api<TS, MR> {
    /// Returns an API to invoke smart services.
    pub fn invocation(&self) -> InvocationApiExt<'_, TS, MR> {
        InvocationApiExt::new(self)
    }
}
