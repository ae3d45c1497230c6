//! Servo output seam.
//!
//! The firmware drives three hobby servos with 50 Hz PWM.  Angle 0°
//! maps to a 500 µs pulse and 180° to 2500 µs.

use crate::config::{SERVO_MAX_PULSE_US, SERVO_MIN_PULSE_US};
use crate::hand::posture::{clamp_angle, Posture};

/// Anything that can hold the hand in a posture.
pub trait Effector {
    fn apply(&mut self, posture: Posture);
}

/// Pulse width (µs) for a servo angle.  Angles above 180° saturate.
pub fn pulse_width_us(angle: u8) -> u16 {
    let angle = clamp_angle(angle as i32) as u32;
    let span = (SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US) as u32;
    SERVO_MIN_PULSE_US + (angle * span / 180) as u16
}

/// Pulse widths for every servo, in thumb/index/fingers order.
pub fn pulse_widths_us(posture: Posture) -> [u16; 3] {
    posture.to_array().map(pulse_width_us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_width_endpoints() {
        assert_eq!(pulse_width_us(0), 500);
        assert_eq!(pulse_width_us(90), 1_500);
        assert_eq!(pulse_width_us(180), 2_500);
    }

    #[test]
    fn pulse_width_saturates_above_range() {
        assert_eq!(pulse_width_us(200), 2_500);
        assert_eq!(pulse_width_us(u8::MAX), 2_500);
    }

    #[test]
    fn pulse_widths_follow_servo_order() {
        assert_eq!(
            pulse_widths_us(Posture::new(0, 90, 180)),
            [500, 1_500, 2_500]
        );
    }
}
