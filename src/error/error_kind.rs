/// Describes an application specific error types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Error caused by the error on the client side.
    ClientError,
    /// A referenced task or module doesn't exist.
    NotFound,
    /// A persistence operation failed mid-flight.
    ServiceOperation,
    /// Unknown error.
    Unknown,
}
