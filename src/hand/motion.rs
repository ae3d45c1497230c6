//! Fixed-step linear interpolation between two postures.
//!
//! A motion is split into `MOTION_STEPS` frames.  Frame `s` (1-based)
//! puts every servo at `start + (target - start) * s / steps`.  After the
//! last frame and its delay, the exact target is written once more and
//! the actuator state is settled on it.
//!
//! Nothing here sleeps.  The interpolator is an explicit timed state
//! machine: the control task asks [`Interpolator::poll`] what to do at
//! a given instant and waits until the returned deadline itself, so the
//! rest of the firmware keeps running during a motion.

use crate::config::MOTION_STEPS;
use crate::hand::posture::{ActuatorState, Posture};

/// Interpolated angle for frame `step` of `steps`.
///
/// Truncates toward zero the way casting `from + (to - from) * p` to an
/// integer would; the result is never negative so plain integer division
/// gives the same value.
pub fn lerp_angle(from: u8, to: u8, step: u32, steps: u32) -> u8 {
    if steps == 0 || step >= steps {
        return to;
    }
    let from = from as i64;
    let diff = to as i64 - from;
    let scaled = from * steps as i64 + diff * step as i64;
    (scaled / steps as i64) as u8
}

/// One start → target motion and its pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Motion {
    start: Posture,
    target: Posture,
    step_delay_ms: u32,
}

impl Motion {
    pub fn new(start: Posture, target: Posture, duration_ms: u32) -> Self {
        Self {
            start,
            target,
            // Truncates to 0 for very short durations: the frames still
            // run, just without pacing.
            step_delay_ms: duration_ms / MOTION_STEPS,
        }
    }

    pub fn start(&self) -> Posture {
        self.start
    }

    pub fn target(&self) -> Posture {
        self.target
    }

    pub fn step_delay_ms(&self) -> u32 {
        self.step_delay_ms
    }

    /// Posture for frame `step` (1-based).  `MOTION_STEPS` and beyond
    /// yield the exact target.
    pub fn frame(&self, step: u32) -> Posture {
        let s = self.start.to_array();
        let t = self.target.to_array();
        Posture::new(
            lerp_angle(s[0], t[0], step, MOTION_STEPS),
            lerp_angle(s[1], t[1], step, MOTION_STEPS),
            lerp_angle(s[2], t[2], step, MOTION_STEPS),
        )
    }
}

/// What the caller should do after a [`Interpolator::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPoll {
    /// No motion in flight.
    Idle,
    /// Nothing to do before `until_ms`.
    Pending { until_ms: u64 },
    /// Write this intermediate posture to the servos.
    Frame(Posture),
    /// Write the final posture; the motion is complete.
    Settled(Posture),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MotionState {
    Idle,
    InMotion {
        motion: Motion,
        /// Frames already emitted.
        step: u32,
        deadline_ms: u64,
    },
}

/// Drives `ActuatorState::current` toward its target one frame at a time.
#[derive(Debug)]
pub struct Interpolator {
    state: MotionState,
}

impl Interpolator {
    pub const fn new() -> Self {
        Self {
            state: MotionState::Idle,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, MotionState::InMotion { .. })
    }

    /// Start moving from the actuator's current posture to its target.
    /// The first frame is due at `now_ms`.
    ///
    /// Returns `false` (and changes nothing) if a motion is already in
    /// flight.
    pub fn begin(&mut self, actuator: &ActuatorState, duration_ms: u32, now_ms: u64) -> bool {
        if self.is_moving() {
            return false;
        }
        self.state = MotionState::InMotion {
            motion: Motion::new(actuator.current(), actuator.target(), duration_ms),
            step: 0,
            deadline_ms: now_ms,
        };
        true
    }

    /// Advance the motion if its next deadline has passed.
    ///
    /// At most one frame is produced per call.  On the final call the
    /// actuator's `current` is overwritten with its target.
    pub fn poll(&mut self, now_ms: u64, actuator: &mut ActuatorState) -> MotionPoll {
        let MotionState::InMotion {
            motion,
            step,
            deadline_ms,
        } = &mut self.state
        else {
            return MotionPoll::Idle;
        };

        if now_ms < *deadline_ms {
            return MotionPoll::Pending {
                until_ms: *deadline_ms,
            };
        }

        if *step < MOTION_STEPS {
            *step += 1;
            *deadline_ms += motion.step_delay_ms() as u64;
            return MotionPoll::Frame(motion.frame(*step));
        }

        let target = motion.target();
        actuator.settle();
        self.state = MotionState::Idle;
        MotionPoll::Settled(target)
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}
