//! Operating modes and the posture each one implies.

use crate::config::{
    GRASP_POSTURE, MOVE_DURATION_MS, PINCH_POSTURE, POINTING_POSTURE, RELAX_MOVE_DURATION_MS,
    RELAX_POSTURE,
};
use crate::hand::posture::Posture;

/// Hand operating mode.  Exactly one is active at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Relax,
    Pinch,
    Grasp,
    Pointing,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Relax, Mode::Pinch, Mode::Grasp, Mode::Pointing];

    /// Canonical target posture for this mode.
    pub const fn posture(self) -> Posture {
        match self {
            Mode::Relax => RELAX_POSTURE,
            Mode::Pinch => PINCH_POSTURE,
            Mode::Grasp => GRASP_POSTURE,
            Mode::Pointing => POINTING_POSTURE,
        }
    }

    /// How long the motion into this mode takes (ms).
    pub const fn entry_duration_ms(self) -> u32 {
        match self {
            Mode::Relax => RELAX_MOVE_DURATION_MS,
            _ => MOVE_DURATION_MS,
        }
    }

    /// Relax has no adjustment concept.
    pub const fn is_adjustable(self) -> bool {
        !matches!(self, Mode::Relax)
    }

    /// Wire / log name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Relax => "RELAX",
            Mode::Pinch => "PINCH",
            Mode::Grasp => "GRASP",
            Mode::Pointing => "POINTING",
        }
    }
}
