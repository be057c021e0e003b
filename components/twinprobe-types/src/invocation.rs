mod access_token;
mod invocation_mode;
mod invocation_request;
mod remote_response;

pub use self::{
    access_token::AccessToken, invocation_mode::InvocationMode,
    invocation_request::InvocationRequest, remote_response::RemoteResponse,
};
