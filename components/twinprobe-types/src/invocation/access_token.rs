use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::time::Duration;
use time::OffsetDateTime;

/// Short-lived bearer credential acquired from the identity provider.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// The bearer token value.
    pub value: String,
    /// Date and time when the token was acquired.
    #[serde(with = "time::serde::timestamp")]
    pub issued_at: OffsetDateTime,
    /// Token lifetime as reported by the identity provider, if any.
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<Duration>,
}

impl AccessToken {
    /// Returns the instant the token expires at, if the identity provider reported a
    /// lifetime for it.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expires_in.map(|expires_in| self.issued_at + expires_in)
    }
}
