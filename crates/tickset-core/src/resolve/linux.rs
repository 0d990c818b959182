use crate::error::{Error, Result};
use crate::module::ModuleView;
use crate::scan::Signature;

use super::ResolveStrategy;

/// `mov ds:interval_per_tick, 3C75C28Fh` — a store of the 0.015 default,
/// with the variable's absolute address as the `C7 05` operand at +2.
const SIGNATURE: &str = "C7 05 ?? ?? ?? ?? 8F C2 75 3C E8";

const POINTER_OFFSET: usize = 2;

#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxStrategy;

impl ResolveStrategy for LinuxStrategy {
    fn name(&self) -> &'static str {
        "linux"
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_embedded_pointer() {
        let mut image = vec![0u8; 256];
        let at = 100;
        image[at..at + 11].copy_from_slice(&[
            0xC7, 0x05, 0x00, 0x00, 0x00, 0x00, 0x8F, 0xC2, 0x75, 0x3C, 0xE8,
        ]);
        image[at + 2..at + 6].copy_from_slice(&0x0BADF00Du32.to_le_bytes());

        let view = ModuleView::new(0x08048000, &image);
        assert_eq!(LinuxStrategy.resolve(&view).unwrap(), 0x0BADF00D);
    }

    #[test]
    fn test_first_match_wins() {
        let mut image = vec![0u8; 256];
        for (at, ptr) in [(16usize, 0x1111u32), (64, 0x2222)] {
            image[at..at + 11].copy_from_slice(&[
                0xC7, 0x05, 0x00, 0x00, 0x00, 0x00, 0x8F, 0xC2, 0x75, 0x3C, 0xE8,
            ]);
            image[at + 2..at + 6].copy_from_slice(&ptr.to_le_bytes());
        }

        let view = ModuleView::new(0, &image);
        assert_eq!(LinuxStrategy.resolve(&view).unwrap(), 0x1111);
    }

    #[test]
    fn test_missing_signature() {
        let image = vec![0u8; 64];
        let view = ModuleView::new(0, &image);

        assert!(matches!(
            LinuxStrategy.resolve(&view),
            Err(Error::SignatureNotFound("linux"))
        ));
    }
}
