//! Interfaces onto the host engine.
//!
//! The engine's own subsystems (globals, client command dispatch, player
//! lookup) are external collaborators; this module only defines the narrow
//! seams the tickrate machinery calls through, plus the game-mode enum that
//! selects a preferred rate.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

use crate::tickset::{TICKRATE_66, TICKRATE_100, Tickrate};

#[cfg(test)]
pub mod mock;

#[cfg(test)]
pub use mock::MockEngine;

/// Engine-side player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// The engine facilities the tickrate machinery needs.
pub trait Engine {
    /// Mirror the applied interval into the engine's global simulation
    /// field, which the engine reads every simulation step.
    fn set_global_interval(&mut self, interval: f32);

    /// The currently-connected local player, if any.
    fn local_player(&self) -> Option<PlayerId>;

    /// Dispatch a console command to a client.
    fn send_client_command(&mut self, player: PlayerId, command: &str);
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum GameMode {
    #[default]
    #[strum(serialize = "unknown")]
    Unknown = 0,
    #[strum(serialize = "surf")]
    Surf = 1,
    #[strum(serialize = "bhop")]
    Bhop = 2,
    #[strum(serialize = "kz")]
    Kz = 3,
    #[strum(serialize = "rj")]
    Rj = 4,
    #[strum(serialize = "tricksurf")]
    Tricksurf = 5,
}

impl GameMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Whether this mode needs the higher-precision simulation step.
    pub fn is_precision_mode(&self) -> bool {
        matches!(self, Self::Bhop | Self::Kz | Self::Tricksurf)
    }

    /// The named rate a mode runs at: 100 for precision modes, 66 for
    /// everything else including unrecognized modes.
    pub fn preferred_tickrate(&self) -> Tickrate {
        if self.is_precision_mode() {
            TICKRATE_100
        } else {
            TICKRATE_66
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_modes_prefer_100() {
        for mode in [GameMode::Bhop, GameMode::Kz, GameMode::Tricksurf] {
            assert_eq!(mode.preferred_tickrate(), TICKRATE_100);
            assert_eq!(mode.preferred_tickrate().interval, 0.01);
        }
    }

    #[test]
    fn test_other_modes_prefer_66() {
        for mode in [GameMode::Surf, GameMode::Rj, GameMode::Unknown] {
            assert_eq!(mode.preferred_tickrate(), TICKRATE_66);
            assert_eq!(mode.preferred_tickrate().interval, 0.015);
        }
    }

    #[test]
    fn test_from_repr() {
        assert_eq!(GameMode::from_u8(2), Some(GameMode::Bhop));
        assert_eq!(GameMode::from_u8(200), None);
    }

    #[test]
    fn test_strum_names() {
        assert_eq!(GameMode::Bhop.to_string(), "bhop");
        assert_eq!("surf".parse::<GameMode>().unwrap(), GameMode::Surf);
    }
}
