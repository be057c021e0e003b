use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Mode of a smart service invocation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvocationMode {
    /// The caller awaits the structured invocation result.
    Sync,
    /// Fire-and-forget; the result is delivered out-of-band.
    Async,
}

impl InvocationMode {
    /// Returns the value of the invocation-mode header sent to the middleware.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationMode::Sync => "sync",
            InvocationMode::Async => "async",
        }
    }
}

impl Display for InvocationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(InvocationMode::Sync),
            "async" => Ok(InvocationMode::Async),
            _ => Err(format!("unknown invocation mode: {s}")),
        }
    }
}
