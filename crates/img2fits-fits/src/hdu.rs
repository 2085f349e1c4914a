use crate::error::{Error, Result};
use crate::header::{header_byte_len, parse_header_blocks};
use crate::primary::{parse_primary_header, PrimaryHeader};

/// The primary Header Data Unit located in a FITS byte stream.
#[derive(Debug, Clone)]
pub struct Hdu {
    /// Parsed primary header.
    pub header: PrimaryHeader,
    /// Byte offset where the data segment begins.
    pub data_start: usize,
    /// Length of the data segment in bytes (unpadded).
    pub data_len: usize,
}

/// Locate and parse the primary HDU at the start of `data`.
///
/// Trailing data padding may be missing, but every data byte must be present.
pub fn parse_primary_hdu(data: &[u8]) -> Result<Hdu> {
    let header_len = header_byte_len(data)?;
    let cards = parse_header_blocks(&data[..header_len])?;
    let header = parse_primary_header(&cards)?;

    let data_len = header.data_byte_count();
    let data_start = header_len;
    if data_start + data_len > data.len() {
        return Err(Error::UnexpectedEof);
    }

    Ok(Hdu {
        header,
        data_start,
        data_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BLOCK_SIZE;
    use crate::header::{serialize_header, Card};
    use crate::primary::build_primary_header;
    use crate::value::Value;

    #[test]
    fn parse_header_only() {
        let bytes = serialize_header(&build_primary_header(8, &[]).unwrap());
        let hdu = parse_primary_hdu(&bytes).unwrap();
        assert_eq!(hdu.data_start, BLOCK_SIZE);
        assert_eq!(hdu.data_len, 0);
        assert_eq!(hdu.header.data_padded_byte_count(), 0);
    }

    #[test]
    fn parse_with_data() {
        let mut bytes = serialize_header(&build_primary_header(32, &[3, 2]).unwrap());
        bytes.resize(2 * BLOCK_SIZE, 0);
        let hdu = parse_primary_hdu(&bytes).unwrap();
        assert_eq!(hdu.header.naxes, vec![3, 2]);
        assert_eq!(hdu.data_len, 24);
        assert_eq!(hdu.header.data_padded_byte_count(), BLOCK_SIZE);
    }

    #[test]
    fn tolerates_missing_padding() {
        let mut bytes = serialize_header(&build_primary_header(8, &[10]).unwrap());
        bytes.extend_from_slice(&[0u8; 10]);
        assert!(parse_primary_hdu(&bytes).is_ok());
    }

    #[test]
    fn truncated_data_is_eof() {
        let mut bytes = serialize_header(&build_primary_header(8, &[10]).unwrap());
        bytes.extend_from_slice(&[0u8; 9]);
        assert!(matches!(
            parse_primary_hdu(&bytes),
            Err(Error::UnexpectedEof)
        ));
    }

    #[test]
    fn extension_first_is_rejected() {
        let cards = vec![
            Card::new("XTENSIO", Value::Logical(true), None),
            Card::new("BITPIX", Value::Integer(8), None),
            Card::new("NAXIS", Value::Integer(0), None),
        ];
        let bytes = serialize_header(&cards);
        assert!(parse_primary_hdu(&bytes).is_err());
    }

    #[test]
    fn empty_input_is_eof() {
        assert!(matches!(parse_primary_hdu(&[]), Err(Error::UnexpectedEof)));
    }
}
