use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the OAuth2 client-credentials flow used to authenticate smart
/// service invocations.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// URL of the identity provider's token endpoint.
    pub token_url: Url,
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: Url::parse("http://localhost:8080/realms/dtm/protocol/openid-connect/token")
                .expect("Cannot parse token URL parameter."),
            client_id: "twinprobe".to_string(),
            client_secret: "".to_string(),
        }
    }
}
