//! Target resolution: turn a loaded engine module into a pointer at its
//! internal tick-interval variable.
//!
//! The engine ships no symbol for the variable, so each platform carries a
//! byte signature over the instructions that reference it. Signatures break
//! whenever the vendor reshuffles the binary; keeping each platform's
//! procedure behind [`ResolveStrategy`] confines that churn to one
//! replaceable unit per platform.

mod linux;
mod macos;
mod windows;

use std::ptr::NonNull;

use tracing::debug;

use crate::error::{Error, Result};
use crate::module::{ENGINE_MODULE, ModuleRegistry, ModuleView};

pub use linux::LinuxStrategy;
pub use macos::MacStrategy;
pub use windows::WindowsStrategy;

/// Pointer at the engine's live tick-interval storage.
///
/// This is foreign memory owned by the engine module. The wrapper exists so
/// the address cannot be mistaken for an ordinary reference: it is only ever
/// read or written behind the state machine's presence check, and it stays
/// valid for the rest of the process once resolved.
#[derive(Debug, Clone, Copy)]
pub struct IntervalPtr(NonNull<f32>);

impl IntervalPtr {
    /// Wrap a resolved address. `None` for a null address.
    pub fn new(addr: usize) -> Option<Self> {
        NonNull::new(addr as *mut f32).map(Self)
    }

    pub fn addr(&self) -> usize {
        self.0.as_ptr() as usize
    }

    /// Write the interval into the engine.
    ///
    /// # Safety
    ///
    /// The pointed-at storage must still be mapped and writable, which holds
    /// for the process lifetime once resolution succeeded.
    pub unsafe fn write(&self, interval: f32) {
        unsafe { self.0.as_ptr().write_volatile(interval) }
    }

    /// Read the engine's current interval.
    ///
    /// # Safety
    ///
    /// Same as [`IntervalPtr::write`].
    pub unsafe fn read(&self) -> f32 {
        unsafe { self.0.as_ptr().read_volatile() }
    }
}

/// One platform's procedure for computing the tick-interval address from a
/// module image.
pub trait ResolveStrategy {
    fn name(&self) -> &'static str;

    /// Absolute address of the tick-interval variable, or
    /// [`Error::SignatureNotFound`].
    fn resolve(&self, module: &ModuleView<'_>) -> Result<usize>;
}

/// The strategy for the target this crate was built for.
pub fn platform_strategy() -> &'static dyn ResolveStrategy {
    #[cfg(target_os = "windows")]
    {
        static STRATEGY: WindowsStrategy = WindowsStrategy;
        &STRATEGY
    }
    #[cfg(target_os = "macos")]
    {
        static STRATEGY: MacStrategy = MacStrategy;
        &STRATEGY
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        static STRATEGY: LinuxStrategy = LinuxStrategy;
        &STRATEGY
    }
}

/// One-shot live resolution: locate the engine module in this process, run
/// the strategy over its mapped image, and wrap the result.
pub fn resolve_live(
    registry: &dyn ModuleRegistry,
    strategy: &dyn ResolveStrategy,
) -> Result<IntervalPtr> {
    let info = registry
        .locate(ENGINE_MODULE)
        .ok_or_else(|| Error::ModuleNotFound(ENGINE_MODULE.to_string()))?;
    debug!(
        "{} mapped at {:#x} ({} bytes)",
        ENGINE_MODULE, info.base, info.size
    );

    let view = unsafe { ModuleView::from_info(&info) };
    let addr = strategy.resolve(&view)?;
    debug!("{} strategy resolved target {:#x}", strategy.name(), addr);

    IntervalPtr::new(addr).ok_or(Error::Unresolved)
}
