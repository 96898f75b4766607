use std::path::PathBuf;

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem access failed for the given path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// A structured-data object could not be serialized
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured domain (or a derived URL) is not a valid URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A filter pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A partial required by the header/footer task is missing
    #[error("missing partial: {}", .0.display())]
    MissingPartial(PathBuf),
}

impl Error {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
