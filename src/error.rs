use crate::mt::MtError;
use std::path::PathBuf;

/// Errors that stop a file (or the whole run) from being processed
#[derive(Debug)]
pub enum Error {
    /// Reading or replacing an entry file failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The configuration file is missing, unreadable or invalid
    Config(String),
    /// The translation provider could not be set up
    Provider(MtError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Provider(e) => write!(f, "Provider error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Provider(e) => Some(e),
            Error::Config(_) => None,
        }
    }
}

impl From<MtError> for Error {
    fn from(error: MtError) -> Self {
        Error::Provider(error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
