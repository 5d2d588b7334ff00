// opcode.rs - Primary opcode classification and encoding formats
//
// The low 7 bits of every RV32I word select one of the base opcode classes,
// and each class implies one of the six immediate layouts (R/I/S/B/U/J).

use std::fmt;

/// RV32I base opcode classes
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpcodeClass {
    LUI,
    AUIPC,
    JAL,
    JALR,
    BRANCH,
    LOAD,
    STORE,
    OP_IMM,
    OP,
    SYSTEM,

    // Any opcode field outside the table above
    INVALID,
}

impl OpcodeClass {
    /// Every class, in declaration order
    pub const ALL: [OpcodeClass; 11] = [
        OpcodeClass::LUI,
        OpcodeClass::AUIPC,
        OpcodeClass::JAL,
        OpcodeClass::JALR,
        OpcodeClass::BRANCH,
        OpcodeClass::LOAD,
        OpcodeClass::STORE,
        OpcodeClass::OP_IMM,
        OpcodeClass::OP,
        OpcodeClass::SYSTEM,
        OpcodeClass::INVALID,
    ];

    /// Classify a primary opcode field. Only bits [6:0] are looked at.
    pub fn from_bits(opcode_field: u8) -> Self {
        match opcode_field & 0x7f {
            0x37 => OpcodeClass::LUI,
            0x17 => OpcodeClass::AUIPC,
            0x6f => OpcodeClass::JAL,
            0x67 => OpcodeClass::JALR,
            0x63 => OpcodeClass::BRANCH,
            0x03 => OpcodeClass::LOAD,
            0x23 => OpcodeClass::STORE,
            0x13 => OpcodeClass::OP_IMM,
            0x33 => OpcodeClass::OP,
            0x73 => OpcodeClass::SYSTEM,
            _ => OpcodeClass::INVALID,
        }
    }

    /// The opcode field this class is encoded with (`None` for INVALID)
    pub fn bits(self) -> Option<u8> {
        let bits = match self {
            OpcodeClass::LUI => 0x37,
            OpcodeClass::AUIPC => 0x17,
            OpcodeClass::JAL => 0x6f,
            OpcodeClass::JALR => 0x67,
            OpcodeClass::BRANCH => 0x63,
            OpcodeClass::LOAD => 0x03,
            OpcodeClass::STORE => 0x23,
            OpcodeClass::OP_IMM => 0x13,
            OpcodeClass::OP => 0x33,
            OpcodeClass::SYSTEM => 0x73,
            OpcodeClass::INVALID => return None,
        };
        Some(bits)
    }

    /// Encoding layout used by this class. INVALID has none.
    pub fn format(self) -> Option<Format> {
        match self {
            OpcodeClass::LUI | OpcodeClass::AUIPC => Some(Format::U),
            OpcodeClass::JAL => Some(Format::J),
            OpcodeClass::BRANCH => Some(Format::B),
            OpcodeClass::STORE => Some(Format::S),
            OpcodeClass::LOAD | OpcodeClass::JALR | OpcodeClass::OP_IMM | OpcodeClass::SYSTEM => {
                Some(Format::I)
            }
            OpcodeClass::OP => Some(Format::R),
            OpcodeClass::INVALID => None,
        }
    }

    /// Human-readable class name, for diagnostics only
    pub fn label(self) -> &'static str {
        match self {
            OpcodeClass::LUI => "LUI",
            OpcodeClass::AUIPC => "AUIPC",
            OpcodeClass::JAL => "JAL",
            OpcodeClass::JALR => "JALR",
            OpcodeClass::BRANCH => "BRANCH",
            OpcodeClass::LOAD => "LOAD",
            OpcodeClass::STORE => "STORE",
            OpcodeClass::OP_IMM => "OP_IMM",
            OpcodeClass::OP => "OP",
            OpcodeClass::SYSTEM => "SYSTEM",
            OpcodeClass::INVALID => "INVALID",
        }
    }

    /// Is this a conditional branch?
    pub fn is_branch(self) -> bool {
        matches!(self, OpcodeClass::BRANCH)
    }

    /// Is this an unconditional jump?
    pub fn is_jump(self) -> bool {
        matches!(self, OpcodeClass::JAL | OpcodeClass::JALR)
    }

    /// ECALL, EBREAK and the CSR instructions all land here
    pub fn is_system(self) -> bool {
        matches!(self, OpcodeClass::SYSTEM)
    }

    /// Does this class access data memory?
    pub fn is_memory(self) -> bool {
        matches!(self, OpcodeClass::LOAD | OpcodeClass::STORE)
    }

    /// Is this a terminator (ends basic block)?
    pub fn is_terminator(self) -> bool {
        self.is_branch() || self.is_jump() || self.is_system()
    }
}

impl fmt::Display for OpcodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// RISC-V base encoding formats
///
/// The formats differ only in where the immediate bits live:
///
/// ```text
///  R | funct7    | rs2 | rs1 | funct3 | rd          | opcode |
///  I | imm[11:0]       | rs1 | funct3 | rd          | opcode |
///  S | imm[11:5] | rs2 | rs1 | funct3 | imm[4:0]    | opcode |
///  B | imm[12|10:5] rs2 | rs1 | funct3 | imm[4:1|11] | opcode |
///  U | imm[31:12]                     | rd          | opcode |
///  J | imm[20|10:1|11|19:12]          | rd          | opcode |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
}

impl Format {
    /// Reassemble and sign-extend this format's immediate from a raw word.
    ///
    /// The result is always a full 32-bit two's-complement value whose upper
    /// bits copy the encoding's single sign bit (instruction bit 31).
    pub fn immediate(self, raw: u32) -> i32 {
        match self {
            Format::R => 0,
            Format::I => decode_i_imm(raw),
            Format::S => decode_s_imm(raw),
            Format::B => decode_b_imm(raw),
            Format::U => decode_u_imm(raw),
            Format::J => decode_j_imm(raw),
        }
    }

    /// Width of the immediate before sign extension
    pub fn immediate_bits(self) -> u32 {
        match self {
            Format::R => 0,
            Format::I | Format::S => 12,
            Format::B => 13,
            Format::J => 21,
            Format::U => 32,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::R => "R",
            Format::I => "I",
            Format::S => "S",
            Format::B => "B",
            Format::U => "U",
            Format::J => "J",
        };
        write!(f, "{}-type", name)
    }
}

// Immediate decoders

fn decode_i_imm(inst: u32) -> i32 {
    // imm[11:0] sits at the top, an arithmetic shift does the extension
    (inst as i32) >> 20
}

fn decode_s_imm(inst: u32) -> i32 {
    let imm11_5 = (inst >> 25) & 0x7f;
    let imm4_0 = (inst >> 7) & 0x1f;
    let imm = (imm11_5 << 5) | imm4_0;
    // Sign extend from 12 bits
    (imm as i32) << 20 >> 20
}

fn decode_b_imm(inst: u32) -> i32 {
    let imm12 = (inst >> 31) & 0x1;
    let imm10_5 = (inst >> 25) & 0x3f;
    let imm4_1 = (inst >> 8) & 0xf;
    let imm11 = (inst >> 7) & 0x1;

    let imm = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    // Sign extend from 13 bits
    (imm as i32) << 19 >> 19
}

fn decode_u_imm(inst: u32) -> i32 {
    (inst & 0xfffff000) as i32
}

fn decode_j_imm(inst: u32) -> i32 {
    let imm20 = (inst >> 31) & 0x1;
    let imm10_1 = (inst >> 21) & 0x3ff;
    let imm11 = (inst >> 20) & 0x1;
    let imm19_12 = (inst >> 12) & 0xff;

    let imm = (imm20 << 20) | (imm19_12 << 12) | (imm11 << 11) | (imm10_1 << 1);
    // Sign extend from 21 bits
    (imm as i32) << 11 >> 11
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_opcodes_round_trip() {
        for class in OpcodeClass::ALL {
            match class.bits() {
                Some(bits) => assert_eq!(OpcodeClass::from_bits(bits), class),
                None => assert_eq!(class, OpcodeClass::INVALID),
            }
        }
    }

    #[test]
    fn test_unknown_opcodes_are_invalid() {
        // FENCE, OP-32 and the compressed quadrants are not part of the table
        for bits in [0x0f, 0x3b, 0x1b, 0x00, 0x01, 0x7f] {
            assert_eq!(OpcodeClass::from_bits(bits), OpcodeClass::INVALID);
        }
    }

    #[test]
    fn test_from_bits_ignores_bit_7() {
        assert_eq!(OpcodeClass::from_bits(0x80 | 0x33), OpcodeClass::OP);
    }

    #[test]
    fn test_formats() {
        assert_eq!(OpcodeClass::LUI.format(), Some(Format::U));
        assert_eq!(OpcodeClass::AUIPC.format(), Some(Format::U));
        assert_eq!(OpcodeClass::JAL.format(), Some(Format::J));
        assert_eq!(OpcodeClass::JALR.format(), Some(Format::I));
        assert_eq!(OpcodeClass::BRANCH.format(), Some(Format::B));
        assert_eq!(OpcodeClass::STORE.format(), Some(Format::S));
        assert_eq!(OpcodeClass::SYSTEM.format(), Some(Format::I));
        assert_eq!(OpcodeClass::OP.format(), Some(Format::R));
        assert_eq!(OpcodeClass::INVALID.format(), None);
    }

    #[test]
    fn test_terminators() {
        assert!(OpcodeClass::BRANCH.is_terminator());
        assert!(OpcodeClass::JALR.is_terminator());
        assert!(OpcodeClass::SYSTEM.is_terminator());
        assert!(!OpcodeClass::LOAD.is_terminator());
        assert!(OpcodeClass::STORE.is_memory());
        assert!(!OpcodeClass::INVALID.is_terminator());
    }

    #[test]
    fn test_i_imm() {
        // addi x1, x0, 42
        assert_eq!(Format::I.immediate(0x02a00093), 42);
        // addi x1, x0, -1
        assert_eq!(Format::I.immediate(0xfff00093), -1);
    }

    #[test]
    fn test_s_imm() {
        // sw x2, -4(x1)
        assert_eq!(Format::S.immediate(0xfe20ae23), -4);
        // sw x2, 8(x1)
        assert_eq!(Format::S.immediate(0x0020a423), 8);
    }

    #[test]
    fn test_b_imm() {
        // beq x1, x2, +16
        assert_eq!(Format::B.immediate(0x00208863), 16);
        // bne x1, x2, -8
        assert_eq!(Format::B.immediate(0xfe209ce3), -8);
    }

    #[test]
    fn test_j_imm() {
        // jal x1, +2048 (only imm[11] set)
        assert_eq!(Format::J.immediate(0x001000ef), 2048);
        // jal x0, -4
        assert_eq!(Format::J.immediate(0xffdff06f), -4);
    }

    #[test]
    fn test_r_imm_is_zero() {
        assert_eq!(Format::R.immediate(0xffff_ffff), 0);
    }
}
