//! Conversion of one image into four FITS files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::channel::{split_channels, Channel};
use crate::codec::Codecs;
use crate::error::{Error, Result};
use crate::options::{ConvertOptions, OverwritePolicy};

/// Where the channel files of one source image go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Source file name without its extension, byte for byte.
    pub base_name: OsString,
    /// Sibling directory named `base_name`.
    pub output_dir: PathBuf,
}

impl OutputLayout {
    pub fn for_source(source: &Path) -> Result<Self> {
        let base_name = source
            .file_stem()
            .map(OsString::from)
            .ok_or_else(|| Error::InvalidTarget(source.to_path_buf()))?;
        let parent = source.parent().unwrap_or_else(|| Path::new(""));
        Ok(OutputLayout {
            output_dir: parent.join(&base_name),
            base_name,
        })
    }

    /// `<output_dir>/<base_name>.<CHANNEL>.fits`
    pub fn channel_path(&self, channel: Channel) -> PathBuf {
        let mut file_name = self.base_name.clone();
        file_name.push(format!(".{}.fits", channel.tag()));
        self.output_dir.join(file_name)
    }
}

/// What a single conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    /// Existing files left alone under [`OverwritePolicy::Skip`].
    pub skipped: Vec<PathBuf>,
}

pub struct Converter<'a> {
    codecs: &'a Codecs,
    options: &'a ConvertOptions,
}

impl<'a> Converter<'a> {
    pub fn new(codecs: &'a Codecs, options: &'a ConvertOptions) -> Self {
        Converter { codecs, options }
    }

    /// Decode `source`, split it and write the grayscale, red, green and blue
    /// planes.
    ///
    /// The first failure aborts; files written before it stay on disk.
    pub fn convert(&self, source: &Path) -> Result<ConversionReport> {
        let layout = OutputLayout::for_source(source)?;

        let image = self.codecs.decode(source)?;
        debug!(
            path = %source.display(),
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "decoded image"
        );
        let channels = split_channels(&image, source)?;
        drop(image);

        std::fs::create_dir_all(&layout.output_dir)
            .map_err(|e| Error::io(&layout.output_dir, e))?;

        let mut report = ConversionReport {
            source: source.to_path_buf(),
            output_dir: layout.output_dir.clone(),
            written: Vec::with_capacity(Channel::ALL.len()),
            skipped: Vec::new(),
        };

        for (channel, plane) in channels.iter() {
            let path = layout.channel_path(channel);

            let overwrite = self.options.overwrite == OverwritePolicy::Overwrite;
            match plane.write(&path, overwrite) {
                Ok(_) => {
                    info!(%channel, path = %path.display(), "wrote channel");
                    report.written.push(path);
                }
                Err(img2fits_fits::Error::FileExists(_))
                    if self.options.overwrite == OverwritePolicy::Skip =>
                {
                    warn!(path = %path.display(), "output exists, skipping");
                    report.skipped.push(path);
                }
                Err(source) => return Err(Error::Fits { path, source }),
            }
        }

        info!(
            source = %source.display(),
            output = %layout.output_dir.display(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            "converted image"
        );
        Ok(report)
    }
}
