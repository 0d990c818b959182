use crate::error::{Error, Result};
use crate::module::ModuleView;
use crate::scan::Signature;

use super::ResolveStrategy;

/// x87 interval math in the engine's frame loop. The `D9 15` store at +16
/// carries the absolute address of the interval variable in its operand.
const SIGNATURE: &str = "8B 0D ?? ?? ?? ?? ?? ?? ?? ?? ?? ?? ?? ?? FF ?? D9 15 ?? ?? ?? ?? \
                         DD 05 ?? ?? ?? ?? DB F1 DD 05 ?? ?? ?? ?? 77 08 D9 CA DB F2 76 1F D9 CA";

/// Offset of the embedded operand address within a match.
const POINTER_OFFSET: usize = 18;

/// Signature scan with an embedded-pointer read. The engine is a 32-bit
/// image, so the operand is a little-endian u32 absolute address.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsStrategy;

impl ResolveStrategy for WindowsStrategy {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn resolve(&self, module: &ModuleView<'_>) -> Result<usize> {
        let signature = Signature::parse(SIGNATURE)?;
        let offset = signature
            .find_in(module.bytes)
            .ok_or(Error::SignatureNotFound(self.name()))?;

        let pointer = module
            .read_u32(offset + POINTER_OFFSET)
            .ok_or(Error::SignatureNotFound(self.name()))?;

        Ok(pointer as usize)
    }
}
