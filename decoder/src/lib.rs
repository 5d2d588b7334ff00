// rv32dec - RV32I instruction decoder
//
// This library implements the decode stage of an instruction-set simulator:
// a pure mapping from a 32-bit RV32I instruction word to its fields.
//
// # Decoding
//
// 1. **Field extraction** (`decode.rs`): rd, rs1, rs2, funct3 and funct7 are
//    pulled from their fixed positions for every word, whatever the format
// 2. **Classification** (`opcode.rs`): bits [6:0] select an `OpcodeClass`;
//    anything outside the base table is `INVALID`, never an error
// 3. **Immediates** (`opcode.rs`): the class selects a `Format` (R/I/S/B/U/J),
//    which reassembles the scattered immediate bits and sign-extends them
//    from instruction bit 31
//
// Funct codes are not interpreted further: telling ADD from SUB, or
// rejecting reserved encodings, is left to the execute stage.
//
// # Code buffers
//
// `stream.rs` walks a little-endian byte buffer word by word. That is the
// only fallible entry point; `decode` itself is total.

pub mod decode;
pub mod error;
pub mod opcode;
pub mod stream;

pub use decode::{decode, DecodedInstruction};
pub use error::DecodeError;
pub use opcode::{Format, OpcodeClass};
pub use stream::{decode_words, disassemble, CodeRegion, Located};
