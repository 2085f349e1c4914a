use std::path::PathBuf;

/// All errors that can occur while writing or reading a FITS image.
#[derive(Debug)]
pub enum Error {
    /// Malformed FITS header block.
    InvalidHeader(&'static str),
    /// Premature end of data while reading.
    UnexpectedEof,
    /// Unrecognized or unsupported BITPIX value.
    InvalidBitpix(i64),
    /// Malformed keyword name in a header card.
    InvalidKeyword,
    /// A required keyword was not found in the header.
    MissingKeyword(&'static str),
    /// Pixel count does not match the product of the axis lengths.
    DataLength { expected: usize, actual: usize },
    /// Destination already exists and overwriting was not requested.
    FileExists(PathBuf),
    /// An I/O error from the standard library.
    Io(std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidHeader(why) => write!(f, "invalid FITS header: {why}"),
            Error::UnexpectedEof => write!(f, "unexpected end of file"),
            Error::InvalidBitpix(v) => write!(f, "invalid BITPIX value: {v}"),
            Error::InvalidKeyword => write!(f, "invalid keyword name"),
            Error::MissingKeyword(kw) => write!(f, "missing required keyword: {kw}"),
            Error::DataLength { expected, actual } => {
                write!(f, "expected {expected} pixels, got {actual}")
            }
            Error::FileExists(path) => write!(f, "file already exists: {}", path.display()),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
