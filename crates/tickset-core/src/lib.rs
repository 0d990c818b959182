//! # tickset-core
//!
//! In-process tickrate patching for a closed-source engine module.
//!
//! The engine keeps its simulation interval in an internal variable with no
//! exported symbol. This crate locates that variable at startup by scanning
//! the loaded module for a per-platform byte signature, then exposes a small
//! state machine that rewrites the interval on request and mirrors the value
//! into the engine's global simulation field.
//!
//! This crate provides:
//! - Byte-pattern matching with wildcard masks
//! - Loaded-module lookup (base address + image size)
//! - Per-platform target resolution strategies
//! - The tickrate state machine and console-variable glue

pub mod cvar;
pub mod engine;
pub mod error;
pub mod module;
pub mod resolve;
pub mod scan;
pub mod tickset;

pub use cvar::{
    CvarDef, INTERVAL_PER_TICK_CVAR, TICKRATE_CVAR, on_interval_per_tick_change,
    on_tickrate_change,
};
pub use engine::{Engine, GameMode, PlayerId};
pub use error::{Error, Result};
pub use module::{ModuleInfo, ModuleRegistry, ModuleView, SystemRegistry};
pub use resolve::{
    IntervalPtr, LinuxStrategy, MacStrategy, ResolveStrategy, WindowsStrategy, platform_strategy,
};
pub use scan::{Signature, data_compare, find_pattern};
pub use tickset::{
    DEFINED_RATES, TICK_EPSILON, TICKRATE_66, TICKRATE_85, TICKRATE_100, TICKRATE_128, TickSet,
    Tickrate, canonicalize, close_enough,
};

#[cfg(test)]
pub use engine::MockEngine;
#[cfg(test)]
pub use module::MockRegistry;
