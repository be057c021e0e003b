use reqwest::StatusCode;

/// Transport- or HTTP-level failure of an invocation call.
#[derive(Debug, thiserror::Error)]
pub enum InvocationFailure {
    /// The middleware rejected the request (HTTP 4xx).
    #[error("remote service rejected the invocation ({status}): {body}")]
    RemoteClient { status: StatusCode, body: String },
    /// The middleware failed to serve the request (HTTP 5xx).
    #[error("remote service failed to execute the invocation ({status}): {body}")]
    RemoteServer { status: StatusCode, body: String },
    /// The request never produced an HTTP response (timeout, connection refused, DNS).
    #[error("invocation transport failure: {0}")]
    Transport(#[source] reqwest_middleware::Error),
}

/// Error of a smart service invocation.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// The invocation request is missing a mandatory field. Detected before any network
    /// I/O is performed.
    #[error("invocation request is missing required field ('{0}')")]
    InvalidInvocation(&'static str),
    /// The request references a module or service that's no longer registered.
    #[error("service ('{service_id}') of module ('{module_id}') is not registered")]
    ModuleNotFound {
        module_id: String,
        service_id: String,
    },
    /// The endpoint could not be resolved, or resolved off the configured middleware
    /// host.
    #[error(
        "cannot resolve endpoint for service ('{service_id}') of module ('{module_id}'): {reason}"
    )]
    EndpointResolution {
        module_id: String,
        service_id: String,
        reason: String,
    },
    /// A bearer credential could not be acquired.
    #[error("failed to acquire an access token: {reason}")]
    Authentication { reason: String },
    /// The call failed at the HTTP or transport level.
    #[error(transparent)]
    Failure(#[from] InvocationFailure),
    /// The call transported fine, but the remote computation did not succeed.
    #[error("remote execution finished in non-terminal state ('{execution_state}')")]
    RemoteExecution { execution_state: String },
    /// The remote response could not be decoded into the expected shape.
    #[error("cannot decode remote response: {0}")]
    ResponseDecoding(#[source] serde_json::Error),
}

impl InvocationError {
    /// Returns a short tag of the failure kind, used for logging and metrics.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            Self::InvalidInvocation(_) => "invalid_invocation",
            Self::ModuleNotFound { .. } => "module_not_found",
            Self::EndpointResolution { .. } => "endpoint_resolution",
            Self::Authentication { .. } => "authentication",
            Self::Failure(InvocationFailure::RemoteClient { .. }) => "remote_client",
            Self::Failure(InvocationFailure::RemoteServer { .. }) => "remote_server",
            Self::Failure(InvocationFailure::Transport(_)) => "transport",
            Self::RemoteExecution { .. } => "remote_execution",
            Self::ResponseDecoding(_) => "response_decoding",
        }
    }
}
