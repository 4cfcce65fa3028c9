use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),

    /// Invalid project path, unreadable ignore file and similar setup problems
    Config(String),

    /// A user-supplied or synthesized filter pattern failed to compile
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// Filter document is not valid JSON for a filter specification
    InvalidFilterSpec(serde_json::Error),

    /// Directory walk failed; aborts the whole scan
    Walk(walkdir::Error),

    /// Worker pool failed to start or stopped accepting work
    Scan(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern '{}': {}", pattern, source)
            }
            Error::InvalidFilterSpec(err) => write!(f, "invalid filter JSON: {}", err),
            Error::Walk(err) => write!(f, "error walking project directory: {}", err),
            Error::Scan(msg) => write!(f, "scan failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::InvalidPattern { source, .. } => Some(source),
            Error::InvalidFilterSpec(err) => Some(err),
            Error::Walk(err) => Some(err),
            Error::Config(_) | Error::Scan(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Walk(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidFilterSpec(err)
    }
}
