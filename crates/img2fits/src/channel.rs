//! Grayscale and per-color planes extracted from a decoded image.

use std::fmt;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use img2fits_fits::FitsFile;
use ndarray::{Array2, Array3, Axis, Zip};

use crate::error::{Error, Result};

/// One output plane. Files are written in [`Channel::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Grayscale,
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Grayscale,
        Channel::Red,
        Channel::Green,
        Channel::Blue,
    ];

    /// Name used in output file names, e.g. `photo.GRAYSCALE.fits`.
    pub fn tag(self) -> &'static str {
        match self {
            Channel::Grayscale => "GRAYSCALE",
            Channel::Red => "RED",
            Channel::Green => "GREEN",
            Channel::Blue => "BLUE",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A `height × width` plane of pixel intensities.
///
/// 8-bit sources keep `u8` samples. Deeper sources are reduced to 16 bits
/// and stored as `i32`, since FITS has no unsigned 16-bit BITPIX.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelPlane {
    U8(Array2<u8>),
    I32(Array2<i32>),
}

impl ChannelPlane {
    /// `(rows, cols)`.
    pub fn dim(&self) -> (usize, usize) {
        match self {
            ChannelPlane::U8(a) => a.dim(),
            ChannelPlane::I32(a) => a.dim(),
        }
    }

    pub fn len(&self) -> usize {
        let (rows, cols) = self.dim();
        rows * cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_u8(&self) -> Option<&Array2<u8>> {
        match self {
            ChannelPlane::U8(a) => Some(a),
            ChannelPlane::I32(_) => None,
        }
    }

    pub fn as_i32(&self) -> Option<&Array2<i32>> {
        match self {
            ChannelPlane::I32(a) => Some(a),
            ChannelPlane::U8(_) => None,
        }
    }

    /// Write the plane as a primary-HDU FITS image at `path`.
    pub fn write(&self, path: &Path, overwrite: bool) -> img2fits_fits::Result<PathBuf> {
        let file = FitsFile::create(path);
        let file = if overwrite { file.overwrite() } else { file };
        match self {
            ChannelPlane::U8(a) => file.write_array(a),
            ChannelPlane::I32(a) => file.write_array(a),
        }
    }
}

/// The four planes of one image.
#[derive(Debug, Clone)]
pub struct ChannelSet {
    planes: [ChannelPlane; 4],
}

impl ChannelSet {
    pub fn get(&self, channel: Channel) -> &ChannelPlane {
        &self.planes[channel as usize]
    }

    /// Planes in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &ChannelPlane)> {
        Channel::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// `(width, height)` of the source image.
    pub fn dimensions(&self) -> (usize, usize) {
        let (rows, cols) = self.planes[0].dim();
        (cols, rows)
    }
}

/// Fixed-point 0.299 / 0.587 / 0.114 weights. They sum to `1 << 16`, so the
/// transform maps full scale to full scale at any bit depth.
const LUMA_WEIGHTS: [u64; 3] = [19595, 38470, 7471];

/// Weighted sum of one RGB sample, rounded half up.
fn luma(r: u64, g: u64, b: u64) -> u64 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    (r * wr + g * wg + b * wb + 0x8000) >> 16
}

/// Split `image` into grayscale, red, green and blue planes.
///
/// Grayscale is the ITU-R 601-2 luma of each pixel. Alpha is dropped.
/// Sources without color (`L`, `LA`) are rejected with [`Error::Channel`];
/// `path` only labels errors.
pub fn split_channels(image: &DynamicImage, path: &Path) -> Result<ChannelSet> {
    let (width, height) = (image.width() as usize, image.height() as usize);

    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => {
            let [r, g, b] = split_interleaved(image.to_rgb8().into_raw(), height, width, path)?;
            let gray = Zip::from(&r)
                .and(&g)
                .and(&b)
                .map_collect(|&r, &g, &b| luma(r.into(), g.into(), b.into()) as u8);
            Ok(ChannelSet {
                planes: [
                    ChannelPlane::U8(gray),
                    ChannelPlane::U8(r),
                    ChannelPlane::U8(g),
                    ChannelPlane::U8(b),
                ],
            })
        }
        DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgb32F(_)
        | DynamicImage::ImageRgba32F(_) => {
            let [r, g, b] = split_interleaved(image.to_rgb16().into_raw(), height, width, path)?;
            let gray = Zip::from(&r)
                .and(&g)
                .and(&b)
                .map_collect(|&r, &g, &b| luma(r.into(), g.into(), b.into()) as i32);
            let widen = |p: Array2<u16>| ChannelPlane::I32(p.mapv(i32::from));
            Ok(ChannelSet {
                planes: [ChannelPlane::I32(gray), widen(r), widen(g), widen(b)],
            })
        }
        other => Err(Error::Channel {
            path: path.to_path_buf(),
            color: format!("{:?}", other.color()),
        }),
    }
}

fn split_interleaved<T: Clone>(
    raw: Vec<T>,
    height: usize,
    width: usize,
    path: &Path,
) -> Result<[Array2<T>; 3]> {
    let pixels =
        Array3::from_shape_vec((height, width, 3), raw).map_err(|e| Error::decode(path, e))?;
    let plane = |c: usize| pixels.index_axis(Axis(2), c).to_owned();
    Ok([plane(0), plane(1), plane(2)])
}
