//! Image decoders available to a run.
//!
//! HEIC/HEIF support is a process capability that has to be set up before the
//! first decode. [`Codecs::register`] is that step; the entry point calls it
//! once and hands the registry to every conversion.

use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::error::{Error, Result};

/// Extensions routed to the HEIF decoder (compared case-insensitively).
const HEIF_EXTENSIONS: [&str; 2] = ["heic", "heif"];

pub struct Codecs {
    #[cfg(feature = "heif")]
    heif: libheif_rs::LibHeif,
}

impl Codecs {
    pub fn register() -> Self {
        let codecs = Codecs {
            #[cfg(feature = "heif")]
            heif: libheif_rs::LibHeif::new(),
        };
        debug!(heif = codecs.heif_enabled(), "image codecs registered");
        codecs
    }

    /// `true` when HEIC/HEIF files can be decoded.
    pub fn heif_enabled(&self) -> bool {
        cfg!(feature = "heif")
    }

    /// Decode `path` into an in-memory raster.
    ///
    /// HEIC/HEIF is picked by extension; everything else is sniffed from the
    /// file contents.
    pub fn decode(&self, path: &Path) -> Result<DynamicImage> {
        if is_heif(path) {
            return self.decode_heif(path);
        }

        ImageReader::open(path)
            .map_err(|e| Error::decode(path, e))?
            .with_guessed_format()
            .map_err(|e| Error::decode(path, e))?
            .decode()
            .map_err(|e| Error::decode(path, e))
    }

    #[cfg(not(feature = "heif"))]
    fn decode_heif(&self, path: &Path) -> Result<DynamicImage> {
        Err(Error::decode(
            path,
            "HEIC/HEIF codec not registered (build with the `heif` feature)",
        ))
    }

    #[cfg(feature = "heif")]
    fn decode_heif(&self, path: &Path) -> Result<DynamicImage> {
        use image::{RgbImage, RgbaImage};
        use libheif_rs::{ColorSpace, HeifContext, RgbChroma};

        let name = path
            .to_str()
            .ok_or_else(|| Error::decode(path, "path is not valid UTF-8"))?;
        let ctx = HeifContext::read_from_file(name).map_err(|e| Error::decode(path, e))?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| Error::decode(path, e))?;

        let has_alpha = handle.has_alpha_channel();
        let chroma = if has_alpha {
            RgbChroma::Rgba
        } else {
            RgbChroma::Rgb
        };
        let decoded = self
            .heif
            .decode(&handle, ColorSpace::Rgb(chroma), None)
            .map_err(|e| Error::decode(path, e))?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| Error::decode(path, "no interleaved plane"))?;

        let width = plane.width as usize;
        let height = plane.height as usize;
        let row_len = width * if has_alpha { 4 } else { 3 };
        let mut pixels = Vec::with_capacity(row_len * height);
        for row in plane.data.chunks(plane.stride).take(height) {
            pixels.extend_from_slice(&row[..row_len]);
        }

        let image = if has_alpha {
            RgbaImage::from_raw(width as u32, height as u32, pixels).map(DynamicImage::ImageRgba8)
        } else {
            RgbImage::from_raw(width as u32, height as u32, pixels).map(DynamicImage::ImageRgb8)
        };
        image.ok_or_else(|| Error::decode(path, "decoded plane is smaller than the image"))
    }
}

fn is_heif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| HEIF_EXTENSIONS.iter().any(|h| e.eq_ignore_ascii_case(h)))
}
