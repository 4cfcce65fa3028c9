use std::fmt;

/// Result type for codeprompt-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Scan, ignore-rule or filter engine error
    Core(codeprompt_core::Error),

    /// Store error other than a missing row
    Index(codeprompt_index::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Project or profile does not exist
    NotFound(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Core(err) => write!(f, "{}", err),
            Error::Index(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Core(err) => Some(err),
            Error::Index(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::NotFound(_) => None,
        }
    }
}

impl From<codeprompt_core::Error> for Error {
    fn from(err: codeprompt_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<codeprompt_index::Error> for Error {
    fn from(err: codeprompt_index::Error) -> Self {
        match err {
            codeprompt_index::Error::NotFound(msg) => Error::NotFound(msg),
            other => Error::Index(other),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
