use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Secure random source failed")]
    Random,
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ring::error::Unspecified> for Error {
    fn from(_: ring::error::Unspecified) -> Self {
        Error::Random
    }
}

impl Error {
    /// Whether the error comes from the user's choice of options rather
    /// than from the environment.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
