use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::hdu::{parse_primary_hdu, Hdu};
use crate::image::{build_image_hdu, read_image_data, ImageData};

/// An in-memory FITS file read from disk.
#[derive(Debug)]
pub struct FitsFile {
    data: Vec<u8>,
}

/// Builder for creating a new FITS file.
pub struct NewFitsFile {
    path: PathBuf,
    overwrite: bool,
}

impl FitsFile {
    /// Open an existing FITS file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(FitsFile { data })
    }

    /// Return a builder for creating a new FITS file.
    pub fn create<P: AsRef<Path>>(path: P) -> NewFitsFile {
        NewFitsFile {
            path: path.as_ref().to_path_buf(),
            overwrite: false,
        }
    }

    /// Parse the primary HDU.
    pub fn primary(&self) -> Result<Hdu> {
        parse_primary_hdu(&self.data)
    }

    /// Read the primary image pixels.
    pub fn read_image(&self) -> Result<ImageData> {
        let hdu = self.primary()?;
        read_image_data(&self.data, &hdu)
    }
}

impl NewFitsFile {
    /// Replace the file if it already exists.
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Write a primary HDU holding `data` shaped by `naxes`.
    ///
    /// Without [`overwrite`](Self::overwrite) the file is opened create-new, so
    /// an existing file yields [`Error::FileExists`] and is left untouched.
    pub fn write_image(self, naxes: &[usize], data: &ImageData) -> Result<PathBuf> {
        let bytes = build_image_hdu(naxes, data)?;

        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => Error::FileExists(self.path.clone()),
            _ => Error::Io(e),
        })?;
        file.write_all(&bytes)?;
        file.flush()?;

        Ok(self.path)
    }
}
