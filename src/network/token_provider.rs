use crate::config::AuthConfig;
use anyhow::anyhow;
use serde::Deserialize;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use twinprobe_types::invocation::AccessToken;

/// Leeway subtracted from the reported token lifetime when deciding whether a cached
/// token can be reused.
const TOKEN_EXPIRY_LEEWAY: Duration = Duration::from_secs(10);

/// Token endpoint response, as defined by the OAuth2 client-credentials flow.
#[derive(Deserialize, Debug)]
struct TokenEndpointResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// Acquires short-lived bearer credentials from the identity provider via the OAuth2
/// client-credentials flow.
pub struct TokenProvider {
    config: AuthConfig,
    client: reqwest::Client,
    // The most recently acquired token, reused until shortly before it expires.
    cached_token: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    /// Creates a token provider for the specified identity provider configuration.
    pub fn new(config: AuthConfig, request_timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: reqwest::Client::builder().timeout(request_timeout).build()?,
            cached_token: Mutex::new(None),
        })
    }

    /// Returns a bearer token, acquiring a fresh one unless a cached token is still
    /// valid. Tokens without a reported lifetime are never reused.
    pub async fn acquire(&self) -> anyhow::Result<AccessToken> {
        let mut cached_token = self.cached_token.lock().await;
        if let Some(token) = cached_token.as_ref() {
            let is_fresh = token.expires_at().is_some_and(|expires_at| {
                OffsetDateTime::now_utc() + TOKEN_EXPIRY_LEEWAY < expires_at
            });
            if is_fresh {
                return Ok(token.clone());
            }
        }

        let token = self.request_token().await?;
        cached_token.replace(token.clone());

        Ok(token)
    }

    async fn request_token(&self) -> anyhow::Result<AccessToken> {
        let response = self
            .client
            .post(self.config.token_url.clone())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "token endpoint responded with {}",
                response.status()
            ));
        }

        let token_response = response.json::<TokenEndpointResponse>().await?;
        let value = token_response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow!("token endpoint response doesn't contain an access token"))?;

        Ok(AccessToken {
            value,
            issued_at: OffsetDateTime::now_utc(),
            expires_in: token_response.expires_in.map(Duration::from_secs),
        })
    }
}
