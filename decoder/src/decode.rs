// decode.rs - RV32I instruction decoder
//
// Splits a 32-bit instruction word into its fixed-position fields, classifies
// the primary opcode and rebuilds the sign-extended immediate.

use crate::opcode::{Format, OpcodeClass};
use std::fmt;

/// A decoded RV32I instruction
///
/// Register and funct fields are always taken from their fixed bit positions,
/// even when the instruction's format does not use them.
///
/// With the `serde` feature an instruction is (de)serialized as its raw word,
/// so a deserialized value is always `decode(raw)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u32", into = "u32")
)]
pub struct DecodedInstruction {
    /// Raw instruction word, as fetched
    pub raw: u32,
    /// Opcode class from bits [6:0]
    pub opcode: OpcodeClass,
    /// Destination register, bits [11:7]
    pub rd: u8,
    /// Source register 1, bits [19:15]
    pub rs1: u8,
    /// Source register 2, bits [24:20]
    pub rs2: u8,
    /// Bits [14:12]
    pub funct3: u8,
    /// Bits [31:25]
    pub funct7: u8,
    /// Sign-extended immediate (0 for R-type and INVALID)
    pub immediate: i32,
}

/// Decode a 32-bit RISC-V instruction
pub fn decode(raw: u32) -> DecodedInstruction {
    let opcode_bits = (raw & 0x7f) as u8;
    let rd = ((raw >> 7) & 0x1f) as u8;
    let funct3 = ((raw >> 12) & 0x7) as u8;
    let rs1 = ((raw >> 15) & 0x1f) as u8;
    let rs2 = ((raw >> 20) & 0x1f) as u8;
    let funct7 = ((raw >> 25) & 0x7f) as u8;

    let opcode = OpcodeClass::from_bits(opcode_bits);
    let immediate = match opcode.format() {
        Some(format) => format.immediate(raw),
        None => 0,
    };

    DecodedInstruction {
        raw,
        opcode,
        rd,
        rs1,
        rs2,
        funct3,
        funct7,
        immediate,
    }
}

impl DecodedInstruction {
    /// Class name for logs and debugging; carries no decode meaning
    pub fn mnemonic(&self) -> &'static str {
        self.opcode.label()
    }

    /// Encoding layout, `None` for INVALID
    pub fn format(&self) -> Option<Format> {
        self.opcode.format()
    }
}

impl From<u32> for DecodedInstruction {
    fn from(raw: u32) -> Self {
        decode(raw)
    }
}

impl From<DecodedInstruction> for u32 {
    fn from(inst: DecodedInstruction) -> Self {
        inst.raw
    }
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(format) = self.format() else {
            return write!(f, "{} raw=0x{:08x}", self.mnemonic(), self.raw);
        };

        write!(f, "{}", self.mnemonic())?;
        match format {
            Format::R => write!(
                f,
                " rd=x{} rs1=x{} rs2=x{} funct3={} funct7=0x{:02x}",
                self.rd, self.rs1, self.rs2, self.funct3, self.funct7
            ),
            Format::I => write!(
                f,
                " rd=x{} rs1=x{} funct3={} imm={}",
                self.rd, self.rs1, self.funct3, self.immediate
            ),
            Format::S | Format::B => write!(
                f,
                " rs1=x{} rs2=x{} funct3={} imm={}",
                self.rs1, self.rs2, self.funct3, self.immediate
            ),
            // Upper immediates read better in hex
            Format::U => write!(f, " rd=x{} imm=0x{:08x}", self.rd, self.immediate as u32),
            Format::J => write!(f, " rd=x{} imm={}", self.rd, self.immediate),
        }
    }
}
