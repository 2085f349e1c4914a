use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a conversion run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("target must be a file or directory: {}", .0.display())]
    InvalidTarget(PathBuf),

    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("{} has no red/green/blue channels to split (color type {color})", path.display())]
    Channel { path: PathBuf, color: String },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}", path.display())]
    Fits {
        path: PathBuf,
        #[source]
        source: img2fits_fits::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
