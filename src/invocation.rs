mod api_ext;
mod invocation_error;

pub use self::{
    api_ext::{InvocationApiExt, INVOCATION_MODE_HEADER},
    invocation_error::{InvocationError, InvocationFailure},
};
