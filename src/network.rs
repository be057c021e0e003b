mod module_registry;
mod token_provider;

pub use self::{
    module_registry::{HttpModuleRegistry, ModuleRegistry, RegistryError},
    token_provider::TokenProvider,
};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::{SpanBackendWithUrl, TracingMiddleware};
use std::time::Duration;

/// External transports used by the invocation pipeline.
pub struct Network<MR: ModuleRegistry> {
    /// Registry resolving logical (module, service) pairs to concrete endpoints.
    pub registry: MR,
    /// Provider of bearer credentials for the middleware calls.
    pub tokens: TokenProvider,
    /// HTTP client used for the invocation calls themselves.
    pub client: ClientWithMiddleware,
}

impl<MR: ModuleRegistry> Network<MR> {
    /// Creates a new `Network` with the specified registry and token provider. The
    /// request timeout applies to every invocation call.
    pub fn new(
        registry: MR,
        tokens: TokenProvider,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = ClientBuilder::new(
            reqwest::Client::builder()
                .timeout(request_timeout)
                .build()?,
        )
        .with(TracingMiddleware::<SpanBackendWithUrl>::new())
        .build();

        Ok(Self {
            registry,
            tokens,
            client,
        })
    }
}
