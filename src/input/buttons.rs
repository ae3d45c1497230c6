//! Edge detection for the six active-low grip buttons.
//!
//! Buttons are wired to ground with internal pull-ups, so a press reads
//! low.  An action fires only on a high → low transition between two
//! samples; holding a button down fires once.

use crate::config::{BUTTON_POLL_MS, BUTTON_SETTLE_MS};
use crate::hand::mode::Mode;
use crate::input::command::Command;

/// Physical buttons, in the order they are checked.
///
/// When several buttons go down in the same sample they are reported
/// in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Relax,
    Pinch,
    Grasp,
    Point,
    Inc,
    Dec,
}

/// Number of physical buttons.
pub const BUTTON_COUNT: usize = 6;

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::Relax,
        Button::Pinch,
        Button::Grasp,
        Button::Point,
        Button::Inc,
        Button::Dec,
    ];

    /// Command issued when this button is pressed.
    pub fn command(self) -> Command {
        match self {
            Button::Relax => Command::SetMode(Mode::Relax),
            Button::Pinch => Command::SetMode(Mode::Pinch),
            Button::Grasp => Command::SetMode(Mode::Grasp),
            Button::Point => Command::SetMode(Mode::Pointing),
            Button::Inc => Command::Increment,
            Button::Dec => Command::Decrement,
        }
    }
}

/// Falling-edge detector for one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeDetector {
    was_high: bool,
}

impl EdgeDetector {
    /// Seed with the level read at startup so a button held during boot
    /// does not fire.
    pub const fn new(initial_high: bool) -> Self {
        Self {
            was_high: initial_high,
        }
    }

    /// Feed the next sample.  Returns `true` on a high → low transition.
    pub fn update(&mut self, is_high: bool) -> bool {
        let fell = self.was_high && !is_high;
        self.was_high = is_high;
        fell
    }
}

/// Time to wait before the next sample after `edges` buttons fired.
///
/// Every accepted edge is followed by its own settle pause, then the
/// regular poll period.
pub const fn next_sample_delay_ms(edges: usize) -> u64 {
    edges as u64 * BUTTON_SETTLE_MS + BUTTON_POLL_MS
}

/// Edge detectors for all six buttons.
#[derive(Clone, Debug)]
pub struct ButtonBank {
    detectors: [EdgeDetector; BUTTON_COUNT],
}

impl ButtonBank {
    /// `levels[i]` is the startup level of `Button::ALL[i]` (`true` = high).
    pub fn new(levels: [bool; BUTTON_COUNT]) -> Self {
        Self {
            detectors: levels.map(EdgeDetector::new),
        }
    }

    /// Feed one sample of every button and return the ones pressed since
    /// the previous sample, in [`Button::ALL`] order.
    pub fn sample(&mut self, levels: [bool; BUTTON_COUNT]) -> heapless::Vec<Button, BUTTON_COUNT> {
        let mut pressed = heapless::Vec::new();
        for ((detector, level), button) in self
            .detectors
            .iter_mut()
            .zip(levels)
            .zip(Button::ALL)
        {
            if detector.update(level) {
                // Capacity equals the button count; push cannot fail.
                let _ = pressed.push(button);
            }
        }
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_UP: [bool; BUTTON_COUNT] = [true; BUTTON_COUNT];

    fn pressed(button: Button) -> [bool; BUTTON_COUNT] {
        let mut levels = ALL_UP;
        let i = Button::ALL.iter().position(|b| *b == button).unwrap();
        levels[i] = false;
        levels
    }

    #[test]
    fn edge_fires_only_on_falling_transition() {
        let mut d = EdgeDetector::new(true);
        assert!(!d.update(true));
        assert!(d.update(false));
        assert!(!d.update(false));
        assert!(!d.update(true));
        assert!(d.update(false));
    }

    #[test]
    fn held_at_boot_does_not_fire() {
        let mut d = EdgeDetector::new(false);
        assert!(!d.update(false));
        assert!(!d.update(true));
        assert!(d.update(false));
    }

    #[test]
    fn holding_a_button_fires_once() {
        let mut bank = ButtonBank::new(ALL_UP);
        let grasp = pressed(Button::Grasp);

        assert_eq!(bank.sample(grasp).as_slice(), &[Button::Grasp]);
        for _ in 0..50 {
            assert!(bank.sample(grasp).is_empty());
        }
        assert!(bank.sample(ALL_UP).is_empty());
        assert_eq!(bank.sample(grasp).as_slice(), &[Button::Grasp]);
    }

    #[test]
    fn simultaneous_edges_follow_enumeration_order() {
        let mut bank = ButtonBank::new(ALL_UP);
        // Dec, Point and Relax all go down in the same sample.
        let mut levels = ALL_UP;
        levels[5] = false;
        levels[3] = false;
        levels[0] = false;

        assert_eq!(
            bank.sample(levels).as_slice(),
            &[Button::Relax, Button::Point, Button::Dec]
        );
    }

    #[test]
    fn idle_sample_waits_one_poll_period() {
        let mut bank = ButtonBank::new(ALL_UP);
        let fired = bank.sample(ALL_UP);
        assert_eq!(next_sample_delay_ms(fired.len()), 10);
    }

    #[test]
    fn each_edge_adds_a_settle_pause() {
        let mut bank = ButtonBank::new(ALL_UP);
        let fired = bank.sample(pressed(Button::Pinch));
        assert_eq!(fired.len(), 1);
        assert_eq!(next_sample_delay_ms(fired.len()), 150 + 10);

        let mut bank = ButtonBank::new(ALL_UP);
        let mut levels = ALL_UP;
        levels[1] = false;
        levels[4] = false;
        let fired = bank.sample(levels);
        assert_eq!(fired.len(), 2);
        assert_eq!(next_sample_delay_ms(fired.len()), 300 + 10);
    }

    #[test]
    fn buttons_map_to_commands() {
        assert_eq!(Button::Relax.command(), Command::SetMode(Mode::Relax));
        assert_eq!(Button::Pinch.command(), Command::SetMode(Mode::Pinch));
        assert_eq!(Button::Grasp.command(), Command::SetMode(Mode::Grasp));
        assert_eq!(Button::Point.command(), Command::SetMode(Mode::Pointing));
        assert_eq!(Button::Inc.command(), Command::Increment);
        assert_eq!(Button::Dec.command(), Command::Decrement);
    }
}
