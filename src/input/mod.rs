//! Input arbitration: buttons and wireless text both become [`Command`]s
//! delivered to one control loop.

pub mod buttons;
pub mod command;

pub use buttons::{next_sample_delay_ms, Button, ButtonBank, BUTTON_COUNT};
pub use command::Command;
