//! Image pixel data for primary HDUs.
//!
//! Pixels are stored on disk big-endian in NAXIS1-fastest order, which is the
//! row-major order of a `height × width` raster.

use bytemuck::pod_collect_to_vec;

use crate::block::{pad_to_block, Fill};
use crate::error::{Error, Result};
use crate::hdu::Hdu;
use crate::header::serialize_header;
use crate::primary::build_primary_header;

/// Image pixel data, typed by BITPIX.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    /// BITPIX 8.
    U8(Vec<u8>),
    /// BITPIX 32.
    I32(Vec<i32>),
}

impl ImageData {
    /// BITPIX value matching the variant.
    pub fn bitpix(&self) -> i64 {
        match self {
            ImageData::U8(_) => u8::BITPIX,
            ImageData::I32(_) => i32::BITPIX,
        }
    }

    /// Number of pixels held.
    pub fn len(&self) -> usize {
        match self {
            ImageData::U8(v) => v.len(),
            ImageData::I32(v) => v.len(),
        }
    }

    /// Returns `true` if no pixels are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A pixel type with a native FITS representation.
pub trait FitsPixel: bytemuck::Pod {
    /// BITPIX written for this type.
    const BITPIX: i64;

    /// Wrap a pixel vector into the matching [`ImageData`] variant.
    fn into_image_data(pixels: Vec<Self>) -> ImageData;

    /// Take the pixels back out of an [`ImageData`] of the matching variant.
    fn from_image_data(data: ImageData) -> Option<Vec<Self>>;
}

impl FitsPixel for u8 {
    const BITPIX: i64 = 8;

    fn into_image_data(pixels: Vec<Self>) -> ImageData {
        ImageData::U8(pixels)
    }

    fn from_image_data(data: ImageData) -> Option<Vec<Self>> {
        match data {
            ImageData::U8(v) => Some(v),
            _ => None,
        }
    }
}

impl FitsPixel for i32 {
    const BITPIX: i64 = 32;

    fn into_image_data(pixels: Vec<Self>) -> ImageData {
        ImageData::I32(pixels)
    }

    fn from_image_data(data: ImageData) -> Option<Vec<Self>> {
        match data {
            ImageData::I32(v) => Some(v),
            _ => None,
        }
    }
}

/// Serialize pixel data into big-endian, block-padded FITS data bytes.
pub fn serialize_image(data: &ImageData) -> Vec<u8> {
    let mut buf = match data {
        ImageData::U8(v) => v.clone(),
        ImageData::I32(v) => {
            let be: Vec<i32> = v.iter().map(|p| p.to_be()).collect();
            pod_collect_to_vec(&be)
        }
    };
    pad_to_block(&mut buf, Fill::Data);
    buf
}

/// Build a complete primary image HDU (header + data) as a byte vector.
///
/// The pixel count must equal the product of `naxes`.
pub fn build_image_hdu(naxes: &[usize], data: &ImageData) -> Result<Vec<u8>> {
    let expected: usize = naxes.iter().product();
    if naxes.is_empty() || expected != data.len() {
        return Err(Error::DataLength {
            expected: if naxes.is_empty() { 0 } else { expected },
            actual: data.len(),
        });
    }

    let cards = build_primary_header(data.bitpix(), naxes)?;
    let header_bytes = serialize_header(&cards);
    let data_bytes = serialize_image(data);

    let mut hdu = Vec::with_capacity(header_bytes.len() + data_bytes.len());
    hdu.extend_from_slice(&header_bytes);
    hdu.extend_from_slice(&data_bytes);
    Ok(hdu)
}

/// Read the pixel data of a parsed HDU out of the full FITS byte stream.
pub fn read_image_data(fits_data: &[u8], hdu: &Hdu) -> Result<ImageData> {
    let end = hdu.data_start + hdu.data_len;
    if end > fits_data.len() {
        return Err(Error::UnexpectedEof);
    }
    decode_pixels(&fits_data[hdu.data_start..end], hdu.header.bitpix)
}

fn decode_pixels(raw: &[u8], bitpix: i64) -> Result<ImageData> {
    match bitpix {
        8 => Ok(ImageData::U8(raw.to_vec())),
        32 => {
            let mut pixels: Vec<i32> = pod_collect_to_vec(raw);
            for v in &mut pixels {
                *v = i32::from_be(*v);
            }
            Ok(ImageData::I32(pixels))
        }
        other => Err(Error::InvalidBitpix(other)),
    }
}
