//! Hand posture and actuator state.
//!
//! A posture is the triple of servo angles (thumb, index, remaining
//! fingers).  Every angle is clamped into `0..=180` when the posture is
//! built, so an out-of-range value can never reach the servos.

/// Lowest servo angle (degrees).
pub const ANGLE_MIN: u8 = 0;

/// Highest servo angle (degrees).
pub const ANGLE_MAX: u8 = 180;

/// Clamp an arbitrary (possibly negative) angle into `0..=180`.
pub const fn clamp_angle(angle: i32) -> u8 {
    if angle < ANGLE_MIN as i32 {
        ANGLE_MIN
    } else if angle > ANGLE_MAX as i32 {
        ANGLE_MAX
    } else {
        angle as u8
    }
}

/// Servo angles describing one hand shape.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Posture {
    thumb: u8,
    index: u8,
    fingers: u8,
}

impl Posture {
    /// Build a posture, clamping each angle to 180°.
    pub const fn new(thumb: u8, index: u8, fingers: u8) -> Self {
        Self {
            thumb: clamp_angle(thumb as i32),
            index: clamp_angle(index as i32),
            fingers: clamp_angle(fingers as i32),
        }
    }

    /// Build a posture from signed arithmetic results.
    pub const fn clamped(thumb: i32, index: i32, fingers: i32) -> Self {
        Self {
            thumb: clamp_angle(thumb),
            index: clamp_angle(index),
            fingers: clamp_angle(fingers),
        }
    }

    pub const fn thumb(&self) -> u8 {
        self.thumb
    }

    pub const fn index(&self) -> u8 {
        self.index
    }

    pub const fn fingers(&self) -> u8 {
        self.fingers
    }

    /// Shift all three angles by `delta`, clamping the result.
    pub const fn shifted(&self, delta: i32) -> Self {
        Self::clamped(
            (self.thumb as i32).saturating_add(delta),
            (self.index as i32).saturating_add(delta),
            (self.fingers as i32).saturating_add(delta),
        )
    }

    /// Angles in servo order: thumb, index, fingers.
    pub const fn to_array(&self) -> [u8; 3] {
        [self.thumb, self.index, self.fingers]
    }

    pub(crate) const fn with_thumb(&self, thumb: u8) -> Self {
        Self::new(thumb, self.index, self.fingers)
    }
}

/// Where the servos are now and where the mode controller wants them.
///
/// `current` is only written by the motion interpolator; `target` only
/// by the mode controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorState {
    current: Posture,
    target: Posture,
}

impl ActuatorState {
    /// Servos at rest in `posture`.
    pub const fn at_rest(posture: Posture) -> Self {
        Self {
            current: posture,
            target: posture,
        }
    }

    pub const fn current(&self) -> Posture {
        self.current
    }

    pub const fn target(&self) -> Posture {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub(crate) fn set_target(&mut self, target: Posture) {
        self.target = target;
    }

    pub(crate) fn settle(&mut self) {
        self.current = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_angle_bounds() {
        assert_eq!(clamp_angle(-1), 0);
        assert_eq!(clamp_angle(-500), 0);
        assert_eq!(clamp_angle(0), 0);
        assert_eq!(clamp_angle(90), 90);
        assert_eq!(clamp_angle(180), 180);
        assert_eq!(clamp_angle(181), 180);
        assert_eq!(clamp_angle(i32::MAX), 180);
    }

    #[test]
    fn posture_new_clamps_above_range() {
        let p = Posture::new(200, 255, 10);
        assert_eq!(p.to_array(), [180, 180, 10]);
    }

    #[test]
    fn posture_shift_clamps_both_directions() {
        let p = Posture::new(10, 100, 170);
        assert_eq!(p.shifted(25).to_array(), [35, 125, 180]);
        assert_eq!(p.shifted(-25).to_array(), [0, 75, 145]);
    }

    #[test]
    fn posture_shift_extreme_deltas_stay_in_range() {
        let p = Posture::new(90, 90, 90);
        assert_eq!(p.shifted(i32::MAX / 2).to_array(), [180, 180, 180]);
        assert_eq!(p.shifted(i32::MIN / 2).to_array(), [0, 0, 0]);
    }

    #[test]
    fn posture_shift_saturates_at_integer_limits() {
        let p = Posture::new(30, 40, 120);
        assert_eq!(p.shifted(i32::MAX).to_array(), [180, 180, 180]);
        assert_eq!(p.shifted(i32::MIN).to_array(), [0, 0, 0]);
    }

    #[test]
    fn actuator_state_settle_copies_target() {
        let mut state = ActuatorState::at_rest(Posture::new(180, 180, 180));
        assert!(state.is_settled());

        state.set_target(Posture::new(0, 60, 45));
        assert!(!state.is_settled());
        assert_eq!(state.current(), Posture::new(180, 180, 180));

        state.settle();
        assert!(state.is_settled());
        assert_eq!(state.current(), Posture::new(0, 60, 45));
    }
}
