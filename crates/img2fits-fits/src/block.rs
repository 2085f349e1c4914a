//! Record geometry: everything in a FITS file is laid out in 2880-byte blocks.

/// Logical record length.
pub const BLOCK_SIZE: usize = 2880;

/// One header card.
pub const CARD_SIZE: usize = 80;

pub const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;

/// How the unused tail of the last block is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// ASCII blanks, for header records.
    Header,
    /// Zero bytes, for data records.
    Data,
}

impl Fill {
    pub const fn byte(self) -> u8 {
        match self {
            Fill::Header => b' ',
            Fill::Data => 0,
        }
    }
}

/// Whole blocks occupied by `len` bytes. An empty section takes no blocks.
pub const fn blocks_needed(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE)
}

/// `len` rounded up to a block boundary.
pub const fn padded_byte_len(len: usize) -> usize {
    blocks_needed(len) * BLOCK_SIZE
}

/// Grow `buf` to the next block boundary.
pub fn pad_to_block(buf: &mut Vec<u8>, fill: Fill) {
    buf.resize(padded_byte_len(buf.len()), fill.byte());
}
