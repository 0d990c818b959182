//! Console-variable glue.
//!
//! Two variables drive the state machine: `sv_interval_per_tick` carries an
//! interval directly, `sv_tickrate` carries ticks per second. The host's
//! console subsystem owns registration and storage; this module defines the
//! variables and the change handlers it calls back into.

use tracing::{debug, warn};

use crate::engine::Engine;
use crate::tickset::{TickSet, close_enough};

/// Registration data for a float console variable.
#[derive(Debug, Clone, Copy)]
pub struct CvarDef {
    pub name: &'static str,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub help: &'static str,
}

impl CvarDef {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const INTERVAL_PER_TICK_CVAR: CvarDef = CvarDef {
    name: "sv_interval_per_tick",
    default: 0.015,
    min: 0.001,
    max: 0.1,
    help: "Changes the interval per tick of the engine. Interval per tick is 1/tickrate, \
           so 100 tickrate = 0.01",
};

pub const TICKRATE_CVAR: CvarDef = CvarDef {
    name: "sv_tickrate",
    default: 66.0,
    min: 10.0,
    max: 1000.0,
    help: "Changes the tickrate of the engine. Alternative to sv_interval_per_tick",
};

/// `sv_interval_per_tick` change callback.
///
/// Applying a rate rewrites the variable's display value, which re-invokes
/// this handler; the closeness check keeps that from looping. Failures are
/// reported and dropped, never retried within the same invocation.
pub fn on_interval_per_tick_change<E: Engine>(tickset: &mut TickSet<E>, value: f32) {
    let interval = INTERVAL_PER_TICK_CVAR.clamp(value);
    if close_enough(interval, tickset.current_interval()) {
        return;
    }

    apply(tickset, interval);
}

/// `sv_tickrate` change callback. The value is ticks per second; the target
/// interval is its reciprocal.
pub fn on_tickrate_change<E: Engine>(tickset: &mut TickSet<E>, value: f32) {
    let interval = 1.0 / TICKRATE_CVAR.clamp(value);
    if close_enough(interval, tickset.current_interval()) {
        return;
    }

    apply(tickset, interval);
}

fn apply<E: Engine>(tickset: &mut TickSet<E>, interval: f32) {
    match tickset.set_interval(interval) {
        Ok(()) => {}
        Err(e) if e.is_noop() => debug!("Tickrate unchanged: {}", e),
        Err(e) => warn!("Failed to apply tickrate from cvar: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MockEngine;
    use crate::resolve::IntervalPtr;
    use crate::tickset::TICKRATE_100;

    fn ready_tickset() -> (TickSet<MockEngine>, Box<f32>) {
        let mut storage = Box::new(0.015f32);
        let ptr = IntervalPtr::new(&raw mut *storage as usize).unwrap();
        let mut tickset = TickSet::new(MockEngine::with_local_player(1));
        assert!(tickset.attach(ptr));
        (tickset, storage)
    }

    #[test]
    fn test_interval_change_applies() {
        let (mut tickset, storage) = ready_tickset();

        on_interval_per_tick_change(&mut tickset, 0.01);
        assert_eq!(tickset.current(), TICKRATE_100);
        assert_eq!(*storage, 0.01);
    }

    #[test]
    fn test_tickrate_change_uses_reciprocal() {
        let (mut tickset, _storage) = ready_tickset();

        on_tickrate_change(&mut tickset, 128.0);
        assert_eq!(tickset.current().label, "128");
    }

    #[test]
    fn test_feedback_loop_guard() {
        let (mut tickset, _storage) = ready_tickset();

        on_tickrate_change(&mut tickset, 100.0);
        let reloads = tickset.engine().reload_count();

        // The engine echoing the applied value back must not re-apply.
        on_tickrate_change(&mut tickset, 100.0);
        on_interval_per_tick_change(&mut tickset, 0.01);
        assert_eq!(tickset.engine().reload_count(), reloads);
    }

    #[test]
    fn test_values_clamped_to_declared_bounds() {
        let (mut tickset, _storage) = ready_tickset();

        // 5000 ticks/sec clamps to 1000 -> 0.001 interval.
        on_tickrate_change(&mut tickset, 5000.0);
        assert!(close_enough(tickset.current_interval(), 0.001));

        on_interval_per_tick_change(&mut tickset, 3.0);
        assert!(close_enough(tickset.current_interval(), 0.1));
    }

    #[test]
    fn test_unresolved_failure_is_absorbed() {
        let mut tickset = TickSet::new(MockEngine::new());

        // Must not panic or change state.
        on_tickrate_change(&mut tickset, 128.0);
        assert_eq!(tickset.current_interval(), 0.015);
    }

    #[test]
    fn test_cvar_defaults_match_66() {
        assert!(close_enough(INTERVAL_PER_TICK_CVAR.default, 0.015));
        assert_eq!(TICKRATE_CVAR.default, 66.0);
        assert_eq!(INTERVAL_PER_TICK_CVAR.name, "sv_interval_per_tick");
        assert_eq!(TICKRATE_CVAR.name, "sv_tickrate");
    }
}
