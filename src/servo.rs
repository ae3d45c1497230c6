//! Three-channel servo bank on one nRF PWM instance.
//!
//! The PWM counter runs at 1 MHz (16 MHz / 16) with a 20 000-tick top
//! value, so one duty tick is one microsecond of pulse width.

use embassy_nrf::pwm::{Instance, Prescaler, SimplePwm};
use prosthetic_hand::actuator::{pulse_widths_us, Effector};
use prosthetic_hand::config::SERVO_FRAME_US;
use prosthetic_hand::hand::Posture;

/// Thumb, index and finger servos on PWM channels 0, 1 and 2.
pub struct ServoBank<'d, T: Instance> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: Instance> ServoBank<'d, T> {
    pub fn new(pwm: SimplePwm<'d, T>) -> Self {
        pwm.set_prescaler(Prescaler::Div16);
        pwm.set_max_duty(SERVO_FRAME_US);
        Self { pwm }
    }
}

impl<'d, T: Instance> Effector for ServoBank<'d, T> {
    fn apply(&mut self, posture: Posture) {
        for (channel, pulse_us) in pulse_widths_us(posture).into_iter().enumerate() {
            // SimplePwm drives the pin low for the first `duty` ticks;
            // invert to get a high pulse of `pulse_us`.
            self.pwm.set_duty(channel, SERVO_FRAME_US - pulse_us);
        }
    }
}
