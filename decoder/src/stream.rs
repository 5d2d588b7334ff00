// stream.rs - Decoding a buffer of little-endian instruction words
//
// Only slices a buffer the caller already holds; reading instruction memory
// is the fetch stage's job.

use crate::decode::{decode, DecodedInstruction};
use crate::error::DecodeError;

/// A contiguous run of code to decode
#[derive(Debug, Clone, Copy)]
pub struct CodeRegion<'a> {
    /// Address of the first byte
    pub base: u32,
    /// Little-endian instruction words
    pub data: &'a [u8],
}

impl<'a> CodeRegion<'a> {
    pub fn new(base: u32, data: &'a [u8]) -> Self {
        Self { base, data }
    }
}

/// A decoded instruction and the address it was found at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Located {
    pub addr: u32,
    pub inst: DecodedInstruction,
}

/// Disassemble a code region into instructions
///
/// The region must start on a word boundary, hold a whole number of words
/// and fit in the 32-bit address space. Otherwise nothing is decoded.
pub fn disassemble(region: &CodeRegion<'_>) -> Result<Vec<Located>, DecodeError> {
    let base = region.base;
    let len = region.data.len();

    if base % 4 != 0 {
        tracing::warn!(base, "rejecting misaligned code region");
        return Err(DecodeError::MisalignedBase { base });
    }

    if base as u64 + len as u64 > 1u64 << 32 {
        tracing::warn!(base, len, "rejecting code region past end of address space");
        return Err(DecodeError::AddressOverflow { base, len });
    }

    let remaining = len % 4;
    if remaining != 0 {
        let addr = base + (len - remaining) as u32;
        tracing::warn!(addr, remaining, "rejecting code region with partial word");
        return Err(DecodeError::TruncatedWord { addr, remaining });
    }

    let instructions: Vec<Located> = region
        .data
        .chunks_exact(4)
        .enumerate()
        .map(|(i, word)| {
            let raw = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            Located {
                addr: base + (i as u32) * 4,
                inst: decode(raw),
            }
        })
        .collect();

    tracing::debug!(base, count = instructions.len(), "decoded code region");

    Ok(instructions)
}

/// Decode a slice of already-fetched words
pub fn decode_words(words: &[u32]) -> Vec<DecodedInstruction> {
    words.iter().copied().map(decode).collect()
}
