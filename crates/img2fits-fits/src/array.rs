//! `ndarray` adapters for 2-D image planes.
//!
//! A plane of shape `(rows, cols)` maps to NAXIS1 = cols, NAXIS2 = rows.

use std::path::PathBuf;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::file::{FitsFile, NewFitsFile};
use crate::image::FitsPixel;

/// FITS axis lengths for a row-major plane.
pub fn plane_naxes<T>(plane: &Array2<T>) -> [usize; 2] {
    let (rows, cols) = plane.dim();
    [cols, rows]
}

impl NewFitsFile {
    /// Write a 2-D plane as the primary image.
    pub fn write_array<T: FitsPixel>(self, plane: &Array2<T>) -> Result<PathBuf> {
        let pixels: Vec<T> = plane.iter().copied().collect();
        self.write_image(&plane_naxes(plane), &T::into_image_data(pixels))
    }
}

impl FitsFile {
    /// Read a 2-D primary image back into a `(rows, cols)` plane.
    pub fn read_array<T: FitsPixel>(&self) -> Result<Array2<T>> {
        let hdu = self.primary()?;
        let (cols, rows) = match hdu.header.naxes.as_slice() {
            [cols, rows] => (*cols, *rows),
            _ => return Err(Error::InvalidHeader("image is not 2-D")),
        };
        let bitpix = hdu.header.bitpix;
        let Some(pixels) = T::from_image_data(self.read_image()?) else {
            return Err(Error::InvalidBitpix(bitpix));
        };
        Array2::from_shape_vec((rows, cols), pixels).map_err(|_| Error::DataLength {
            expected: rows * cols,
            actual: hdu.header.pixel_count(),
        })
    }
}
