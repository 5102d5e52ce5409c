use thiserror::Error;

/// Core error type shared across datafit crates.
///
/// Every variant is terminal for the evaluation that raised it.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw input is zero bytes or otherwise absent.
    #[error("empty input: {0}")]
    EmptyInput(String),
    /// Raw input cannot be parsed into a rectangular table.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// A caller-supplied descriptor violates its domain bounds.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
    /// A threshold or weight profile violates its bounds.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::EmptyInput(_) => "empty_input",
            Error::MalformedInput(_) => "malformed_input",
            Error::InvalidDescriptor(_) => "invalid_descriptor",
            Error::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Convenience alias for results returned by datafit crates.
pub type Result<T> = std::result::Result<T, Error>;
