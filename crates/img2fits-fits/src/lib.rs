//! Pure Rust writer and reader for single-image FITS files.
//!
//! Each file is one primary HDU: a default header (`SIMPLE`, `BITPIX`,
//! `NAXIS`, `NAXISn`, `EXTEND`) followed by big-endian pixel data padded to
//! the 2880-byte block size.

#[cfg(feature = "array")]
pub mod array;
pub mod block;
pub mod error;
pub mod file;
pub mod hdu;
pub mod header;
pub mod image;
pub mod primary;
pub mod value;

pub use block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE};
pub use error::{Error, Result};
pub use file::{FitsFile, NewFitsFile};
pub use image::{FitsPixel, ImageData};
