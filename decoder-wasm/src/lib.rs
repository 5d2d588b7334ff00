// rv32dec-wasm: RV32I decoder for browser-hosted simulators
//
// This crate wraps the rv32dec decoder for use inside a WebAssembly
// environment. It compiles to wasm32-unknown-unknown via wasm-bindgen so a
// JavaScript fetch stage can hand instruction words to the decoder.

use wasm_bindgen::prelude::*;

/// A decoded instruction as seen from JavaScript
#[wasm_bindgen]
pub struct WasmInstruction {
    inner: rv32dec::DecodedInstruction,
}

#[wasm_bindgen]
impl WasmInstruction {
    #[wasm_bindgen(getter)]
    pub fn raw(&self) -> u32 {
        self.inner.raw
    }

    #[wasm_bindgen(getter)]
    pub fn mnemonic(&self) -> String {
        self.inner.mnemonic().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn rd(&self) -> u8 {
        self.inner.rd
    }

    #[wasm_bindgen(getter)]
    pub fn rs1(&self) -> u8 {
        self.inner.rs1
    }

    #[wasm_bindgen(getter)]
    pub fn rs2(&self) -> u8 {
        self.inner.rs2
    }

    #[wasm_bindgen(getter)]
    pub fn funct3(&self) -> u8 {
        self.inner.funct3
    }

    #[wasm_bindgen(getter)]
    pub fn funct7(&self) -> u8 {
        self.inner.funct7
    }

    #[wasm_bindgen(getter)]
    pub fn immediate(&self) -> i32 {
        self.inner.immediate
    }

    /// Diagnostic rendering, e.g. `OP rd=x10 rs1=x11 rs2=x12 funct3=0 funct7=0x00`
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.to_string()
    }
}

/// Decode a single instruction word.
#[wasm_bindgen]
pub fn decode_word(raw: u32) -> WasmInstruction {
    WasmInstruction {
        inner: rv32dec::decode(raw),
    }
}

/// Decode a region of RISC-V machine code.
///
/// Takes raw little-endian bytes and their virtual address, returns one
/// `address: text` line per instruction.
#[wasm_bindgen]
pub fn decode_region(code: &[u8], base_addr: u32) -> Result<String, JsValue> {
    decode_region_inner(code, base_addr).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn decode_region_inner(code: &[u8], base_addr: u32) -> anyhow::Result<String> {
    use anyhow::Context;

    let region = rv32dec::CodeRegion::new(base_addr, code);
    let instructions = rv32dec::disassemble(&region)
        .with_context(|| format!("Failed to decode region 0x{:08x}", base_addr))?;
    if instructions.is_empty() {
        anyhow::bail!("No instructions decoded in region 0x{:08x}", base_addr);
    }

    let lines: Vec<String> = instructions
        .iter()
        .map(|located| format!("0x{:08x}: {}", located.addr, located.inst))
        .collect();
    Ok(lines.join("\n"))
}

/// Get version string
#[wasm_bindgen]
pub fn version() -> String {
    format!("rv32dec-wasm {}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_listing() {
        let mut code = 0x00c58533u32.to_le_bytes().to_vec();
        code.extend_from_slice(&0x0000_0073u32.to_le_bytes());
        let text = decode_region_inner(&code, 0x1000).unwrap();
        assert_eq!(
            text,
            "0x00001000: OP rd=x10 rs1=x11 rs2=x12 funct3=0 funct7=0x00\n\
             0x00001004: SYSTEM rd=x0 rs1=x0 funct3=0 imm=0"
        );
    }

    #[test]
    fn test_empty_region_is_error() {
        assert!(decode_region_inner(&[], 0x1000).is_err());
    }

    #[test]
    fn test_truncated_region_is_error() {
        let err = decode_region_inner(&[0x13, 0x00], 0x1000).unwrap_err();
        assert!(format!("{:#}", err).contains("truncated"));
    }

    #[test]
    fn test_decode_word_getters() {
        let inst = decode_word(0x123452b7);
        assert_eq!(inst.mnemonic(), "LUI");
        assert_eq!(inst.rd(), 5);
        assert_eq!(inst.immediate(), 0x12345000);
    }
}
