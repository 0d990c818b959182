//! Loaded-module lookup.
//!
//! The engine module has no exported symbol for the tick interval, so the
//! resolver only needs one thing from the host process: the base address and
//! image size of a named module. Everything else is scanning.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
pub use mock::MockRegistry;

/// Well-known name of the engine module holding the tick interval.
#[cfg(target_os = "macos")]
pub const ENGINE_MODULE: &str = "engine.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
pub const ENGINE_MODULE: &str = "engine.so";
#[cfg(not(unix))]
pub const ENGINE_MODULE: &str = "engine.dll";

/// Base address and image size of a loaded module. Transient: produced by a
/// [`ModuleRegistry`] lookup and consumed immediately by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    pub base: usize,
    pub size: usize,
}

/// The host process's loaded-module table.
pub trait ModuleRegistry {
    /// Look up a loaded module by file name. `None` if it is not loaded.
    fn locate(&self, name: &str) -> Option<ModuleInfo>;
}

/// Queries the running process via the platform loader APIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRegistry;

impl ModuleRegistry for SystemRegistry {
    #[cfg(target_os = "windows")]
    fn locate(&self, name: &str) -> Option<ModuleInfo> {
        windows::locate(name)
    }

    #[cfg(target_os = "linux")]
    fn locate(&self, name: &str) -> Option<ModuleInfo> {
        linux::locate(name)
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    fn locate(&self, _name: &str) -> Option<ModuleInfo> {
        None
    }
}

/// A borrowed byte window over a module image.
///
/// `base` is the address the bytes were mapped at, so match offsets can be
/// turned back into absolute addresses. Tests build views over owned
/// buffers; the live path borrows the mapped image itself.
#[derive(Debug, Clone, Copy)]
pub struct ModuleView<'a> {
    pub base: usize,
    pub bytes: &'a [u8],
}

impl<'a> ModuleView<'a> {
    pub fn new(base: usize, bytes: &'a [u8]) -> Self {
        Self { base, bytes }
    }

    /// Borrow the mapped image of a live module.
    ///
    /// # Safety
    ///
    /// `info` must describe a module that stays loaded and mapped for the
    /// lifetime of the returned view.
    pub unsafe fn from_info(info: &ModuleInfo) -> ModuleView<'static> {
        ModuleView {
            base: info.base,
            bytes: unsafe { std::slice::from_raw_parts(info.base as *const u8, info.size) },
        }
    }

    /// Absolute address of an offset into this view.
    pub fn address_of(&self, offset: usize) -> usize {
        self.base + offset
    }

    /// Little-endian u32 at `offset`, if fully in bounds.
    pub fn read_u32(&self, offset: usize) -> Option<u32> {
        let bytes = self.bytes.get(offset..offset + 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_address_of() {
        let bytes = [0u8; 16];
        let view = ModuleView::new(0x1000, &bytes);
        assert_eq!(view.address_of(0), 0x1000);
        assert_eq!(view.address_of(12), 0x100C);
    }

    #[test]
    fn test_view_read_u32() {
        let bytes = [0x78, 0x56, 0x34, 0x12, 0xFF];
        let view = ModuleView::new(0, &bytes);
        assert_eq!(view.read_u32(0), Some(0x12345678));
        assert_eq!(view.read_u32(1), Some(0xFF123456));
        assert_eq!(view.read_u32(2), None);
    }

    #[test]
    fn test_mock_registry_lookup() {
        let registry = MockRegistry::with_module(
            ENGINE_MODULE,
            ModuleInfo {
                base: 0x10000,
                size: 0x2000,
            },
        );

        let info = registry.locate(ENGINE_MODULE).unwrap();
        assert_eq!(info.base, 0x10000);
        assert_eq!(info.size, 0x2000);
        assert!(registry.locate("client.dll").is_none());
    }
}
