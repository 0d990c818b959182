use tracing::debug;

use crate::error::{Error, Result};
use crate::module::ModuleView;
use crate::scan::Signature;

use super::ResolveStrategy;

/// Image size of the known engine.dylib build. When it matches we can skip
/// scanning and use the fixed offset directly.
const KNOWN_IMAGE_SIZE: usize = 12_581_936;

/// Offset of the interval variable within the known build.
const KNOWN_OFFSET: usize = 0x7DC120;

/// Data bytes around the interval variable itself; the match address is the
/// target, no dereference.
const SIGNATURE: &str = "8F C2 75 3C 78 ?? ?? 0C 6C ?? ?? ?? 01 00";

/// Fixed-offset fast path guarded by the image size, with a signature scan
/// fallback for updated engine builds.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacStrategy;

impl ResolveStrategy for MacStrategy {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn resolve(&self, module: &ModuleView<'_>) -> Result<usize> {
        if module.bytes.len() == KNOWN_IMAGE_SIZE {
            debug!("engine image size matches known build, using fixed offset");
            return Ok(module.address_of(KNOWN_OFFSET));
        }

        let signature = Signature::parse(SIGNATURE)?;
        let offset = signature
            .find_in(module.bytes)
            .ok_or(Error::SignatureNotFound(self.name()))?;

        Ok(module.address_of(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIG_BYTES: [u8; 14] = [
        0x8F, 0xC2, 0x75, 0x3C, 0x78, 0x00, 0x00, 0x0C, 0x6C, 0x00, 0x00, 0x00, 0x01, 0x00,
    ];

    #[test]
    fn test_known_image_size_uses_fixed_offset() {
        let image = vec![0u8; KNOWN_IMAGE_SIZE];
        let view = ModuleView::new(0x1_0000_0000, &image);

        let addr = MacStrategy.resolve(&view).unwrap();
        assert_eq!(addr, 0x1_0000_0000 + KNOWN_OFFSET);
    }

    #[test]
    fn test_updated_image_falls_back_to_scan() {
        let mut image = vec![0u8; 4096];
        let at = 0x222;
        image[at..at + SIG_BYTES.len()].copy_from_slice(&SIG_BYTES);

        let view = ModuleView::new(0x5000, &image);
        // Match address itself is the target on this path.
        assert_eq!(MacStrategy.resolve(&view).unwrap(), 0x5000 + at);
    }

    #[test]
    fn test_updated_image_without_signature() {
        let image = vec![0u8; 4096];
        let view = ModuleView::new(0, &image);

        assert!(matches!(
            MacStrategy.resolve(&view),
            Err(Error::SignatureNotFound("macos"))
        ));
    }
}
