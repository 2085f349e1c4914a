//! Split raster images into grayscale, red, green and blue FITS files.
//!
//! ```no_run
//! let summary = img2fits::run("~/Pictures/moon.jpg")?;
//! assert_eq!(summary.files_written(), 4);
//! # Ok::<(), img2fits::Error>(())
//! ```

pub mod channel;
pub mod codec;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod options;

pub use channel::{split_channels, Channel, ChannelPlane, ChannelSet};
pub use codec::Codecs;
pub use convert::{ConversionReport, Converter, OutputLayout};
pub use dispatch::{resolve_target, run, scan_directory, Dispatcher, RunSummary, Target};
pub use error::{Error, Result};
pub use options::{ConvertOptions, ExtensionSet, OverwritePolicy};
