//! FITS header card parsing, writing, and validation.

use std::str;

use crate::block::{pad_to_block, Fill, BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE};
use crate::error::{Error, Result};
use crate::value::{format_value, parse_value, Value};

const END: [u8; 8] = *b"END     ";

/// A FITS header card (one 80-byte keyword record).
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Columns 1-8, blank padded.
    pub keyword: [u8; 8],
    /// Present when columns 9-10 hold the `= ` indicator.
    pub value: Option<Value>,
    /// Text after `/`, or the body of a commentary card.
    pub comment: Option<String>,
}

impl Card {
    /// Build a valued card from a short keyword name.
    pub fn new(name: &str, value: Value, comment: Option<&str>) -> Self {
        Card {
            keyword: keyword(name),
            value: Some(value),
            comment: comment.map(String::from),
        }
    }

    pub fn keyword_str(&self) -> &str {
        str::from_utf8(&self.keyword)
            .map(str::trim_end)
            .unwrap_or("")
    }

    pub fn is_end(&self) -> bool {
        self.keyword == END
    }

    /// Integer value of this card, if it carries one.
    pub fn integer(&self) -> Option<i64> {
        match self.value {
            Some(Value::Integer(n)) => Some(n),
            _ => None,
        }
    }
}

/// Blank-pad `name` to the 8-byte keyword field. Longer names are cut.
pub fn keyword(name: &str) -> [u8; 8] {
    let mut field = [b' '; 8];
    for (slot, b) in field.iter_mut().zip(name.bytes()) {
        *slot = b;
    }
    field
}

/// Find the first card with the given keyword name.
pub fn find_card<'a>(cards: &'a [Card], name: &str) -> Option<&'a Card> {
    let kw = keyword(name);
    cards.iter().find(|c| c.keyword == kw)
}

fn is_keyword_byte(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'0'..=b'9' | b' ' | b'-' | b'_')
}

/// Parse one card. Keywords are restricted to upper-case letters, digits,
/// `-` and `_`.
pub fn parse_card(card_bytes: &[u8; CARD_SIZE]) -> Result<Card> {
    let (head, body) = card_bytes.split_at(8);
    let mut keyword = [0u8; 8];
    keyword.copy_from_slice(head);

    if !keyword.iter().all(|&b| is_keyword_byte(b)) {
        return Err(Error::InvalidKeyword);
    }

    if keyword == END {
        return Ok(Card {
            keyword,
            value: None,
            comment: None,
        });
    }

    if body.starts_with(b"= ") {
        if let Some((val, comment)) = parse_value(&body[2..]) {
            return Ok(Card {
                keyword,
                value: Some(val),
                comment: comment.map(String::from),
            });
        }
    }

    // Commentary or unsupported value: keep the free text.
    let text = str::from_utf8(body)
        .map_err(|_| Error::InvalidHeader("card is not ASCII"))?
        .trim_end();
    Ok(Card {
        keyword,
        value: None,
        comment: (!text.is_empty()).then(|| String::from(text)),
    })
}

/// Cards from the start of `data` up to and including END.
pub fn parse_header_blocks(data: &[u8]) -> Result<Vec<Card>> {
    let header_len = header_byte_len(data)?;
    let mut cards = Vec::with_capacity(header_len / CARD_SIZE);

    for chunk in data[..header_len].chunks_exact(CARD_SIZE) {
        let card_bytes: &[u8; CARD_SIZE] = chunk
            .try_into()
            .map_err(|_| Error::InvalidHeader("truncated card"))?;
        let card = parse_card(card_bytes)?;
        let done = card.is_end();
        cards.push(card);
        if done {
            return Ok(cards);
        }
    }

    Err(Error::UnexpectedEof)
}

/// Bytes taken by the header: every block up to the one holding END.
pub fn header_byte_len(data: &[u8]) -> Result<usize> {
    data.chunks_exact(CARD_SIZE)
        .position(|card| card[..8] == END)
        .map(|index| (index / CARDS_PER_BLOCK + 1) * BLOCK_SIZE)
        .filter(|&len| len <= data.len())
        .ok_or(Error::UnexpectedEof)
}

/// Render `card` as an 80-column record.
pub fn format_card(card: &Card) -> [u8; CARD_SIZE] {
    let mut buf = [b' '; CARD_SIZE];
    buf[..8].copy_from_slice(&card.keyword);

    if let Some(ref value) = card.value {
        buf[8] = b'=';
        buf[9] = b' ';

        let mut field = format_value(value);
        if let Some(ref comment) = card.comment {
            insert_comment(&mut field, comment);
        }
        buf[10..80].copy_from_slice(&field);
    } else if let Some(ref comment) = card.comment {
        let bytes = comment.as_bytes();
        let len = bytes.len().min(72);
        buf[8..8 + len].copy_from_slice(&bytes[..len]);
    }

    buf
}

/// Insert a ` / comment` after the fixed-format value (which ends at byte 20).
fn insert_comment(field: &mut [u8; 70], comment: &str) {
    const SEP_START: usize = 21;

    field[SEP_START] = b'/';
    field[SEP_START + 1] = b' ';

    let comment_start = SEP_START + 2;
    let bytes = comment.as_bytes();
    let len = bytes.len().min(70 - comment_start);
    field[comment_start..comment_start + len].copy_from_slice(&bytes[..len]);
}

pub fn format_end_card() -> [u8; CARD_SIZE] {
    let mut buf = [b' '; CARD_SIZE];
    buf[..8].copy_from_slice(&END);
    buf
}

/// `cards` followed by END, blank-filled to whole blocks.
pub fn serialize_header(cards: &[Card]) -> Vec<u8> {
    let mut buf = Vec::with_capacity((cards.len() + 1) * CARD_SIZE);
    for card in cards {
        buf.extend_from_slice(&format_card(card));
    }
    buf.extend_from_slice(&format_end_card());
    pad_to_block(&mut buf, Fill::Header);
    buf
}

fn require_keyword_at<'a>(
    cards: &'a [Card],
    index: usize,
    name: &'static str,
) -> Result<&'a Card> {
    cards
        .get(index)
        .filter(|card| card.keyword == keyword(name))
        .ok_or(Error::MissingKeyword(name))
}

/// Validate that SIMPLE, BITPIX and NAXIS open the header in that order.
pub fn validate_primary(cards: &[Card]) -> Result<()> {
    let simple = require_keyword_at(cards, 0, "SIMPLE")?;
    if simple.value != Some(Value::Logical(true)) {
        return Err(Error::InvalidHeader("SIMPLE must be T"));
    }
    require_keyword_at(cards, 1, "BITPIX")?;
    require_keyword_at(cards, 2, "NAXIS")?;
    Ok(())
}
