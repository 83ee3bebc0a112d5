//! Assembly text emission

use crate::asm::AsmInst;

/// Section directive opening every emitted file
pub const TEXT_SECTION: &str = ".text";

/// Render instructions as an assembly file: the `.text` directive followed by
/// one tab-indented instruction per line, in the order given.
pub fn emit_program(instructions: &[AsmInst]) -> String {
    let mut out = String::with_capacity(8 + instructions.len() * 16);
    out.push_str(TEXT_SECTION);
    out.push('\n');
    for inst in instructions {
        out.push('\t');
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}
