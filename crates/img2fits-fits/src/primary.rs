//! Primary HDU header parsing and construction.

use crate::block::padded_byte_len;
use crate::error::{Error, Result};
use crate::header::{find_card, validate_primary, Card};
use crate::value::Value;

/// BITPIX values this crate can write and read back.
pub const SUPPORTED_BITPIX: [i64; 2] = [8, 32];

/// Parsed primary HDU header.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryHeader {
    /// BITPIX value (8 or 32).
    pub bitpix: i64,
    /// Dimensions (NAXIS1, NAXIS2, ..., NAXISn).
    pub naxes: Vec<usize>,
}

impl PrimaryHeader {
    /// Number of pixels described by the axes; 0 when NAXIS is 0.
    pub fn pixel_count(&self) -> usize {
        match self.naxes.as_slice() {
            [] => 0,
            axes => axes.iter().product(),
        }
    }

    /// Bytes of pixel data before padding.
    pub fn data_byte_count(&self) -> usize {
        self.pixel_count() * bytes_per_pixel(self.bitpix)
    }

    /// Bytes of pixel data rounded up to whole blocks.
    pub fn data_padded_byte_count(&self) -> usize {
        padded_byte_len(self.data_byte_count())
    }
}

fn bytes_per_pixel(bitpix: i64) -> usize {
    (bitpix.unsigned_abs() / 8) as usize
}

fn check_bitpix(bitpix: i64) -> Result<i64> {
    if SUPPORTED_BITPIX.contains(&bitpix) {
        Ok(bitpix)
    } else {
        Err(Error::InvalidBitpix(bitpix))
    }
}

/// Integer value of `name` that must be present and not negative.
fn axis_length(cards: &[Card], name: &str, missing: &'static str) -> Result<usize> {
    let value = find_card(cards, name)
        .and_then(Card::integer)
        .ok_or(Error::MissingKeyword(missing))?;
    usize::try_from(value).map_err(|_| Error::InvalidHeader("negative axis length"))
}

/// Validate the mandatory keywords and read BITPIX and the axes.
pub fn parse_primary_header(cards: &[Card]) -> Result<PrimaryHeader> {
    validate_primary(cards)?;

    let bitpix = find_card(cards, "BITPIX")
        .and_then(Card::integer)
        .ok_or(Error::MissingKeyword("BITPIX"))
        .and_then(check_bitpix)?;

    let naxis = axis_length(cards, "NAXIS", "NAXIS")?;
    let naxes = (1..=naxis)
        .map(|i| axis_length(cards, &format!("NAXIS{i}"), "NAXISn"))
        .collect::<Result<Vec<_>>>()?;

    Ok(PrimaryHeader { bitpix, naxes })
}

/// Build the default card set for a primary image HDU.
///
/// Mandatory keywords are followed by `EXTEND = T`; nothing else is written.
pub fn build_primary_header(bitpix: i64, naxes: &[usize]) -> Result<Vec<Card>> {
    check_bitpix(bitpix)?;

    let mut cards = vec![
        Card::new(
            "SIMPLE",
            Value::Logical(true),
            Some("conforms to FITS standard"),
        ),
        Card::new(
            "BITPIX",
            Value::Integer(bitpix),
            Some("array data type"),
        ),
        Card::new(
            "NAXIS",
            Value::Integer(naxes.len() as i64),
            Some("number of array dimensions"),
        ),
    ];

    cards.extend(naxes.iter().zip(1..).map(|(&len, n)| {
        Card::new(&format!("NAXIS{n}"), Value::Integer(len as i64), None)
    }));
    cards.push(Card::new(
        "EXTEND",
        Value::Logical(true),
        Some("extensions may follow"),
    ));

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BLOCK_SIZE;

    fn card(keyword: &str, value: Value) -> Card {
        Card::new(keyword, value, None)
    }

    #[test]
    fn parse_valid_2d_image() {
        let cards = [
            card("SIMPLE", Value::Logical(true)),
            card("BITPIX", Value::Integer(8)),
            card("NAXIS", Value::Integer(2)),
            card("NAXIS1", Value::Integer(4)),
            card("NAXIS2", Value::Integer(2)),
        ];
        let hdr = parse_primary_header(&cards).unwrap();
        assert_eq!(hdr.bitpix, 8);
        assert_eq!(hdr.naxes, vec![4, 2]);
        assert_eq!(hdr.pixel_count(), 8);
        assert_eq!(hdr.data_byte_count(), 8);
        assert_eq!(hdr.data_padded_byte_count(), BLOCK_SIZE);
    }

    #[test]
    fn parse_zero_axis() {
        let cards = [
            card("SIMPLE", Value::Logical(true)),
            card("BITPIX", Value::Integer(8)),
            card("NAXIS", Value::Integer(0)),
        ];
        let hdr = parse_primary_header(&cards).unwrap();
        assert!(hdr.naxes.is_empty());
        assert_eq!(hdr.data_byte_count(), 0);
        assert_eq!(hdr.data_padded_byte_count(), 0);
    }

    #[test]
    fn data_byte_count_32bit() {
        let cards = build_primary_header(32, &[100, 200]).unwrap();
        let hdr = parse_primary_header(&cards).unwrap();
        assert_eq!(hdr.data_byte_count(), 4 * 100 * 200);
    }

    #[test]
    fn build_produces_default_card_set() {
        let cards = build_primary_header(8, &[640, 480]).unwrap();
        let names: Vec<&str> = cards.iter().map(Card::keyword_str).collect();
        assert_eq!(
            names,
            ["SIMPLE", "BITPIX", "NAXIS", "NAXIS1", "NAXIS2", "EXTEND"]
        );
        assert_eq!(cards[5].value, Some(Value::Logical(true)));
    }

    #[test]
    fn error_unsupported_bitpix() {
        assert!(matches!(
            build_primary_header(16, &[10]),
            Err(Error::InvalidBitpix(16))
        ));

        let cards = [
            card("SIMPLE", Value::Logical(true)),
            card("BITPIX", Value::Integer(-32)),
            card("NAXIS", Value::Integer(0)),
        ];
        assert!(matches!(
            parse_primary_header(&cards),
            Err(Error::InvalidBitpix(-32))
        ));
    }

    #[test]
    fn error_missing_naxis_n() {
        let cards = [
            card("SIMPLE", Value::Logical(true)),
            card("BITPIX", Value::Integer(8)),
            card("NAXIS", Value::Integer(2)),
            card("NAXIS1", Value::Integer(100)),
        ];
        assert!(matches!(
            parse_primary_header(&cards),
            Err(Error::MissingKeyword("NAXISn"))
        ));
    }

    #[test]
    fn error_negative_naxis() {
        let cards = [
            card("SIMPLE", Value::Logical(true)),
            card("BITPIX", Value::Integer(8)),
            card("NAXIS", Value::Integer(-1)),
        ];
        assert!(matches!(
            parse_primary_header(&cards),
            Err(Error::InvalidHeader(_))
        ));
    }
}
