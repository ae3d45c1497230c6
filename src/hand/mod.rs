//! Hand model: postures, modes, motion and the mode controller.
//!
//! ```text
//! Command ──► HandController ──► Interpolator ──► ActuatorState ──► servos
//!             (mode table)       (25 frames)      (current/target)
//! ```

pub mod controller;
pub mod mode;
pub mod motion;
pub mod posture;

pub use controller::{HandController, IgnoreReason, Outcome};
pub use mode::Mode;
pub use motion::{Interpolator, Motion, MotionPoll};
pub use posture::{ActuatorState, Posture};
