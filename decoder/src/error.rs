// error.rs - Errors raised while walking a code buffer
//
// Decoding a single word never fails; only the framing of a byte buffer
// into words can.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("region base 0x{base:08x} is not 4-byte aligned")]
    MisalignedBase { base: u32 },

    #[error("truncated instruction at 0x{addr:08x}: {remaining} trailing byte(s)")]
    TruncatedWord { addr: u32, remaining: usize },

    #[error("region at 0x{base:08x} with {len} bytes runs past the end of the address space")]
    AddressOverflow { base: u32, len: usize },
}
