use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;
use url::Url;

/// Configuration of the digital-twin middleware the invocations are sent to.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DtmConfig {
    /// Base URL of the middleware. Resolved service endpoints must live on this host.
    pub url: Url,
    /// Timeout applied to every outgoing request (endpoint resolution, token
    /// acquisition, and the invocation itself).
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub invoke_timeout: Duration,
}

impl Default for DtmConfig {
    fn default() -> Self {
        Self {
            url: Url::parse("http://localhost:9196/").expect("Cannot parse DTM URL parameter."),
            invoke_timeout: Duration::from_secs(30),
        }
    }
}
