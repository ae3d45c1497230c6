//! Mode state machine.
//!
//! `HandController` is the single owned context for the hand: the
//! active mode, the actuator state and the interpolator.  The control
//! task owns it and feeds it commands from every input source, so all
//! mutation happens in one place.
//!
//! ```text
//!          ┌──────────── setMode(any) ────────────┐
//!          ▼                                      │
//!   Relax ◄──► Pinch ◄──► Grasp ◄──► Pointing ────┘
//!   (no adjust)  └──── adjust_by(±delta) ────┘
//! ```

use crate::config::{ADJUST_STEP_DEG, GRASP_POSTURE, MOVE_DURATION_MS};
use crate::hand::mode::Mode;
use crate::hand::motion::{Interpolator, MotionPoll};
use crate::hand::posture::{ActuatorState, Posture};
use crate::input::command::Command;

/// Why a command produced no motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// INC / DEC while in Relax.
    NotAdjustable,
    /// Unrecognised wireless token.
    Unrecognized,
    /// A motion is still in flight.
    Busy,
}

/// Result of handing a command to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A motion toward `target` has started.
    Moving { mode: Mode, target: Posture },
    /// Emergency stop acknowledged.  No actuator action is taken.
    Acknowledged,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

pub struct HandController {
    mode: Mode,
    actuator: ActuatorState,
    interpolator: Interpolator,
}

impl HandController {
    /// Start in Relax with the servos at the Relax posture.
    pub const fn new() -> Self {
        Self {
            mode: Mode::Relax,
            actuator: ActuatorState::at_rest(Mode::Relax.posture()),
            interpolator: Interpolator::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn actuator(&self) -> &ActuatorState {
        &self.actuator
    }

    pub fn is_moving(&self) -> bool {
        self.interpolator.is_moving()
    }

    /// Switch to `mode` and start moving to its canonical posture.
    pub fn set_mode(&mut self, mode: Mode, now_ms: u64) -> Outcome {
        if self.is_moving() {
            return Outcome::Ignored(IgnoreReason::Busy);
        }

        info!("Mode: {}", mode.as_str());
        self.mode = mode;
        self.actuator.set_target(mode.posture());
        self.start_motion(mode.entry_duration_ms(), now_ms)
    }

    /// Nudge the current target by `delta` degrees.
    ///
    /// Ignored in Relax.  In Grasp the thumb stays at its fixed grip
    /// angle and only index and fingers move.
    pub fn adjust_by(&mut self, delta: i32, now_ms: u64) -> Outcome {
        if self.is_moving() {
            return Outcome::Ignored(IgnoreReason::Busy);
        }
        if !self.mode.is_adjustable() {
            debug!("Adjust by {} ignored in {}", delta, self.mode.as_str());
            return Outcome::Ignored(IgnoreReason::NotAdjustable);
        }

        let shifted = self.actuator.target().shifted(delta);
        let target = match self.mode {
            Mode::Grasp => shifted.with_thumb(GRASP_POSTURE.thumb()),
            _ => shifted,
        };
        self.actuator.set_target(target);
        self.start_motion(MOVE_DURATION_MS, now_ms)
    }

    /// Apply a command from either input source.
    pub fn handle(&mut self, command: &Command, now_ms: u64) -> Outcome {
        match command {
            Command::SetMode(mode) => self.set_mode(*mode, now_ms),
            Command::Increment => self.adjust_by(ADJUST_STEP_DEG, now_ms),
            Command::Decrement => self.adjust_by(-ADJUST_STEP_DEG, now_ms),
            Command::EmergencyStop => {
                warn!("EMERGENCY STOP (no movement)");
                Outcome::Acknowledged
            }
            Command::Unknown(text) => {
                warn!("Unknown command: {}", text.as_str());
                Outcome::Ignored(IgnoreReason::Unrecognized)
            }
        }
    }

    /// Advance the motion in flight.  See [`Interpolator::poll`].
    pub fn poll_motion(&mut self, now_ms: u64) -> MotionPoll {
        let poll = self.interpolator.poll(now_ms, &mut self.actuator);
        if let MotionPoll::Settled(_) = poll {
            self.log_status();
        }
        poll
    }

    fn start_motion(&mut self, duration_ms: u32, now_ms: u64) -> Outcome {
        self.interpolator.begin(&self.actuator, duration_ms, now_ms);
        Outcome::Moving {
            mode: self.mode,
            target: self.actuator.target(),
        }
    }

    fn log_status(&self) {
        let current = self.actuator.current();
        info!(
            "Mode = {} | Angles = {},{},{}",
            self.mode.as_str(),
            current.thumb(),
            current.index(),
            current.fingers()
        );
    }
}

impl Default for HandController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(ctrl: &mut HandController, mut now: u64) -> u64 {
        loop {
            match ctrl.poll_motion(now) {
                MotionPoll::Idle | MotionPoll::Settled(_) => return now,
                MotionPoll::Pending { until_ms } => now = until_ms,
                MotionPoll::Frame(_) => {}
            }
        }
    }

    fn in_mode(mode: Mode) -> HandController {
        let mut ctrl = HandController::new();
        ctrl.set_mode(mode, 0);
        settle(&mut ctrl, 0);
        ctrl
    }

    #[test]
    fn starts_relaxed_and_settled() {
        let ctrl = HandController::new();
        assert_eq!(ctrl.mode(), Mode::Relax);
        assert_eq!(ctrl.actuator().current(), Posture::new(180, 180, 180));
        assert!(ctrl.actuator().is_settled());
        assert!(!ctrl.is_moving());
    }

    #[test]
    fn set_mode_targets_canonical_posture() {
        for mode in Mode::ALL {
            let mut ctrl = HandController::new();
            let outcome = ctrl.set_mode(mode, 0);
            assert_eq!(
                outcome,
                Outcome::Moving {
                    mode,
                    target: mode.posture()
                }
            );
            settle(&mut ctrl, 0);
            assert_eq!(ctrl.actuator().current(), mode.posture());
        }
    }

    #[test]
    fn relax_moves_faster_than_other_modes() {
        let mut ctrl = in_mode(Mode::Pinch);
        ctrl.set_mode(Mode::Relax, 1_000);
        assert_eq!(settle(&mut ctrl, 1_000), 1_400);

        ctrl.set_mode(Mode::Grasp, 2_000);
        assert_eq!(settle(&mut ctrl, 2_000), 2_500);
    }

    #[test]
    fn every_mode_reachable_from_every_mode() {
        for from in Mode::ALL {
            for to in Mode::ALL {
                let mut ctrl = in_mode(from);
                ctrl.set_mode(to, 0);
                settle(&mut ctrl, 0);
                assert_eq!(ctrl.mode(), to);
                assert_eq!(ctrl.actuator().current(), to.posture());
            }
        }
    }

    #[test]
    fn adjust_in_relax_is_noop() {
        let mut ctrl = HandController::new();
        let before = *ctrl.actuator();
        assert_eq!(
            ctrl.adjust_by(25, 0),
            Outcome::Ignored(IgnoreReason::NotAdjustable)
        );
        assert_eq!(
            ctrl.adjust_by(-25, 0),
            Outcome::Ignored(IgnoreReason::NotAdjustable)
        );
        assert_eq!(*ctrl.actuator(), before);
        assert!(!ctrl.is_moving());
    }

    #[test]
    fn adjust_shifts_all_axes_outside_grasp() {
        let mut ctrl = in_mode(Mode::Pinch);
        ctrl.adjust_by(25, 0);
        assert_eq!(ctrl.actuator().target(), Posture::new(55, 65, 145));
        settle(&mut ctrl, 0);
        assert_eq!(ctrl.actuator().current(), Posture::new(55, 65, 145));
    }

    #[test]
    fn grasp_thumb_never_moves() {
        let mut ctrl = in_mode(Mode::Grasp);
        for delta in [25, 25, -100, 300, -25, 7] {
            ctrl.adjust_by(delta, 0);
            assert_eq!(ctrl.actuator().target().thumb(), GRASP_POSTURE.thumb());
            settle(&mut ctrl, 0);
        }
    }

    #[test]
    fn adjust_clamps_for_any_magnitude() {
        for mode in [Mode::Pinch, Mode::Pointing] {
            for delta in [i32::MIN / 2, -1_000, -181, -1, 1, 181, 1_000, i32::MAX / 2] {
                let mut ctrl = in_mode(mode);
                ctrl.adjust_by(delta, 0);
                for angle in ctrl.actuator().target().to_array() {
                    assert!(angle <= 180);
                }
            }
        }
    }

    #[test]
    fn adjust_at_integer_limits_clamps() {
        let mut ctrl = in_mode(Mode::Pinch);
        ctrl.adjust_by(i32::MAX, 0);
        assert_eq!(ctrl.actuator().target(), Posture::new(180, 180, 180));
        settle(&mut ctrl, 0);

        ctrl.adjust_by(i32::MIN, 0);
        assert_eq!(ctrl.actuator().target(), Posture::new(0, 0, 0));
    }

    #[test]
    fn busy_controller_rejects_commands() {
        let mut ctrl = HandController::new();
        ctrl.set_mode(Mode::Grasp, 0);
        assert!(ctrl.is_moving());

        assert_eq!(
            ctrl.set_mode(Mode::Pinch, 10),
            Outcome::Ignored(IgnoreReason::Busy)
        );
        assert_eq!(ctrl.adjust_by(25, 10), Outcome::Ignored(IgnoreReason::Busy));
        assert_eq!(ctrl.mode(), Mode::Grasp);
        assert_eq!(ctrl.actuator().target(), GRASP_POSTURE);
    }

    #[test]
    fn emergency_stop_changes_nothing() {
        let mut ctrl = in_mode(Mode::Pinch);
        let before = *ctrl.actuator();
        assert_eq!(ctrl.handle(&Command::EmergencyStop, 0), Outcome::Acknowledged);
        assert_eq!(*ctrl.actuator(), before);
        assert_eq!(ctrl.mode(), Mode::Pinch);
        assert!(!ctrl.is_moving());
    }

    #[test]
    fn unknown_command_changes_nothing() {
        let mut ctrl = in_mode(Mode::Pointing);
        let before = *ctrl.actuator();
        let cmd = Command::parse("WAVE").unwrap();
        assert_eq!(
            ctrl.handle(&cmd, 0),
            Outcome::Ignored(IgnoreReason::Unrecognized)
        );
        assert_eq!(*ctrl.actuator(), before);
        assert_eq!(ctrl.mode(), Mode::Pointing);
    }

    #[test]
    fn increment_and_decrement_use_adjust_step() {
        let mut ctrl = in_mode(Mode::Pointing);
        ctrl.handle(&Command::Decrement, 0);
        assert_eq!(ctrl.actuator().target(), Posture::new(95, 155, 0));
        settle(&mut ctrl, 0);
        ctrl.handle(&Command::Increment, 0);
        assert_eq!(ctrl.actuator().target(), Posture::new(120, 180, 25));
    }
}
