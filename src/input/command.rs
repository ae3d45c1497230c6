//! Commands shared by both input sources, and the wireless token parser.
//!
//! Tokens are ASCII, case-sensitive and must match exactly after
//! surrounding whitespace is trimmed:
//!
//! ```text
//! RELAX | PINCH | GRASP | POINTING | INC | DEC | EMERGENCY_STOP
//! ```

use crate::config::BLE_COMMAND_MAX_LEN;
use crate::hand::mode::Mode;
use heapless::String;

/// One request for the mode controller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    SetMode(Mode),
    Increment,
    Decrement,
    /// Acknowledged and logged; the servos are not detached.
    EmergencyStop,
    /// Anything else, kept (truncated) for logging.
    Unknown(String<BLE_COMMAND_MAX_LEN>),
}

impl Command {
    /// Parse a text token.  Returns `None` for an empty (or all
    /// whitespace) message, which is ignored rather than reported.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.trim();
        if token.is_empty() {
            return None;
        }

        let command = match token {
            "RELAX" => Command::SetMode(Mode::Relax),
            "PINCH" => Command::SetMode(Mode::Pinch),
            "GRASP" => Command::SetMode(Mode::Grasp),
            "POINTING" => Command::SetMode(Mode::Pointing),
            "INC" => Command::Increment,
            "DEC" => Command::Decrement,
            "EMERGENCY_STOP" => Command::EmergencyStop,
            other => Command::Unknown(truncated(other)),
        };
        Some(command)
    }

    /// Parse a raw characteristic write.  Payloads that are not UTF-8
    /// become `Unknown` with no text.
    pub fn from_bytes(payload: &[u8]) -> Option<Self> {
        match core::str::from_utf8(payload) {
            Ok(text) => Self::parse(text),
            Err(_) => Some(Command::Unknown(String::new())),
        }
    }
}

fn truncated(text: &str) -> String<BLE_COMMAND_MAX_LEN> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
