//! Tickrate values and the state machine that applies them.

use tracing::{debug, warn};

use crate::engine::{Engine, GameMode};
use crate::error::{Error, Result};
use crate::module::ModuleRegistry;
use crate::resolve::{self, IntervalPtr, ResolveStrategy};

/// Tolerance for interval comparisons. Converting `1/rate` to an interval
/// and back accumulates f32 error well below this, while the gap between
/// adjacent named rates is three orders of magnitude above it.
pub const TICK_EPSILON: f32 = 1e-6;

pub fn close_enough(a: f32, b: f32) -> bool {
    (a - b).abs() < TICK_EPSILON
}

/// A tick interval plus its display label.
#[derive(Debug, Clone, Copy)]
pub struct Tickrate {
    /// Seconds of simulated time per server frame.
    pub interval: f32,
    pub label: &'static str,
}

impl Tickrate {
    pub const fn new(interval: f32, label: &'static str) -> Self {
        Self { interval, label }
    }

    pub const fn custom(interval: f32) -> Self {
        Self::new(interval, "CUSTOM")
    }

    /// Ticks per second (reciprocal of the interval).
    pub fn rate(&self) -> f32 {
        1.0 / self.interval
    }
}

/// Two tickrates are the same rate when their intervals are within
/// [`TICK_EPSILON`], regardless of label.
impl PartialEq for Tickrate {
    fn eq(&self, other: &Self) -> bool {
        close_enough(self.interval, other.interval)
    }
}

pub const TICKRATE_66: Tickrate = Tickrate::new(0.015, "66");
pub const TICKRATE_85: Tickrate = Tickrate::new(0.011_718_75, "85");
pub const TICKRATE_100: Tickrate = Tickrate::new(0.01, "100");
pub const TICKRATE_128: Tickrate = Tickrate::new(0.007_812_5, "128");

pub const DEFINED_RATES: [Tickrate; 4] = [TICKRATE_66, TICKRATE_85, TICKRATE_100, TICKRATE_128];

/// Replace a custom value with its named constant when it matches one.
pub fn canonicalize(rate: Tickrate) -> Tickrate {
    DEFINED_RATES
        .iter()
        .find(|named| **named == rate)
        .copied()
        .unwrap_or(rate)
}

/// The tickrate state machine.
///
/// Starts without a resolved target; [`TickSet::init`] runs target
/// resolution exactly once, during module startup. If resolution fails the
/// machine stays unresolved for the rest of the process and every apply
/// operation fails with [`Error::Unresolved`] instead of touching foreign
/// memory.
pub struct TickSet<E: Engine> {
    engine: E,
    target: Option<IntervalPtr>,
    current: Tickrate,
}

impl<E: Engine> TickSet<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            target: None,
            current: TICKRATE_66,
        }
    }

    /// One-shot startup resolution of the engine's interval variable.
    ///
    /// Failure is absorbed: it is reported here once and leaves the machine
    /// permanently disabled rather than crashing the host.
    pub fn init(&mut self, registry: &dyn ModuleRegistry, strategy: &dyn ResolveStrategy) -> bool {
        match resolve::resolve_live(registry, strategy) {
            Ok(ptr) => self.attach(ptr),
            Err(e) => {
                warn!("Tick interval resolution failed: {}", e);
                false
            }
        }
    }

    /// Adopt a resolved target pointer. Only the first attach counts; the
    /// ready state is entered at most once per process.
    pub fn attach(&mut self, ptr: IntervalPtr) -> bool {
        if self.target.is_some() {
            warn!("Tick interval target already resolved, ignoring reattach");
            return false;
        }
        debug!("Tick interval target resolved at {:#x}", ptr.addr());
        self.target = Some(ptr);
        true
    }

    pub fn is_ready(&self) -> bool {
        self.target.is_some()
    }

    pub fn current(&self) -> Tickrate {
        self.current
    }

    pub fn current_interval(&self) -> f32 {
        self.current.interval
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Apply the named rate a game mode runs at.
    pub fn set_tickrate_for_mode(&mut self, mode: GameMode) -> Result<()> {
        self.set_tickrate(mode.preferred_tickrate())
    }

    /// Apply a raw interval, canonicalized to a named rate when it matches
    /// one within epsilon.
    pub fn set_interval(&mut self, interval: f32) -> Result<()> {
        let requested = Tickrate::custom(interval);
        if requested == self.current {
            return Err(Error::NoOpSameValue);
        }
        self.set_tickrate(canonicalize(requested))
    }

    /// Apply a tickrate: write the interval through the resolved target,
    /// mirror it into the engine's global simulation field, and ask the
    /// local player's client to reload. State only changes when the write
    /// happens.
    pub fn set_tickrate(&mut self, new: Tickrate) -> Result<()> {
        if new == self.current {
            debug!("Tickrate not changed: new == current");
            return Err(Error::NoOpSameValue);
        }

        let Some(target) = self.target else {
            warn!("Failed to set tickrate: target unresolved");
            return Err(Error::Unresolved);
        };

        unsafe { target.write(new.interval) };
        self.engine.set_global_interval(new.interval);
        self.current = new;

        if let Some(player) = self.engine.local_player() {
            self.engine.send_client_command(player, "reload");
        }

        debug!("Interval per tick set to {}", new.interval);
        debug!("Tickrate set to {} ({})", new.rate(), new.label);
        Ok(())
    }
}
