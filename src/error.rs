mod error_kind;

pub use self::error_kind::ErrorKind;

use std::fmt::{Debug, Display, Formatter};

/// Application-specific error condition with a coarse-grained kind attached.
pub struct Error {
    /// The kind of the error.
    pub kind: ErrorKind,
    /// The root cause of the error.
    pub root_cause: anyhow::Error,
}

impl Error {
    /// Creates a client error from the specified message.
    pub fn client<M: Display + Debug + Send + Sync + 'static>(message: M) -> Self {
        Self {
            kind: ErrorKind::ClientError,
            root_cause: anyhow::anyhow!(message),
        }
    }

    /// Creates a client error with the specified root cause.
    pub fn client_with_root_cause(root_cause: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::ClientError,
            root_cause,
        }
    }

    /// Creates a not-found error from the specified message.
    pub fn not_found<M: Display + Debug + Send + Sync + 'static>(message: M) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            root_cause: anyhow::anyhow!(message),
        }
    }

    /// Creates a service operation error with the specified root cause.
    pub fn service_operation(root_cause: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::ServiceOperation,
            root_cause,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root_cause)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {:?}", self.kind, self.root_cause)
    }
}

impl From<anyhow::Error> for Error {
    fn from(root_cause: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            root_cause,
        }
    }
}
