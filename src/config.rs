//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::hand::posture::Posture;

// Hand postures

/// Open hand. Also the startup posture.
pub const RELAX_POSTURE: Posture = Posture::new(180, 180, 180);

/// Thumb and index meet, remaining fingers mostly open.
pub const PINCH_POSTURE: Posture = Posture::new(30, 40, 120);

/// Power grip. The thumb stays fixed at this angle for grip strength.
pub const GRASP_POSTURE: Posture = Posture::new(0, 60, 45);

/// Index extended, other fingers curled.
pub const POINTING_POSTURE: Posture = Posture::new(120, 180, 0);

// Motion

/// Number of interpolation frames per motion.
pub const MOTION_STEPS: u32 = 25;

/// Duration of a motion into Relax (ms). Relax is a quicker "reset" move.
pub const RELAX_MOVE_DURATION_MS: u32 = 400;

/// Duration of every other motion, including adjustments (ms).
pub const MOVE_DURATION_MS: u32 = 500;

/// Angle change applied by one INC / DEC command (degrees).
pub const ADJUST_STEP_DEG: i32 = 25;

// Buttons

/// Interval between two button samples (ms).
pub const BUTTON_POLL_MS: u64 = 10;

/// Settle delay after an accepted button edge (ms).
/// No debounce hardware is assumed on the inputs.
pub const BUTTON_SETTLE_MS: u64 = 150;

// Telemetry / battery

/// Battery report cadence (ms).
pub const TELEMETRY_INTERVAL_MS: u64 = 5_000;

/// SAADC full-scale voltage (mV). VDD reference with 1/4 gain.
pub const BATTERY_ADC_FULL_SCALE_MV: u32 = 3_300;

/// SAADC full-scale count (12-bit).
pub const BATTERY_ADC_MAX_COUNT: u32 = 4_095;

/// Ratio of the battery sense divider (1 = pin wired straight to the cell).
pub const BATTERY_DIVIDER_RATIO: u32 = 1;

/// Battery voltage reported as 0 % (mV).
pub const BATTERY_EMPTY_MV: u32 = 3_300;

/// Battery voltage reported as 100 % (mV).
pub const BATTERY_FULL_MV: u32 = 4_200;

// Servos

/// Servo PWM frame length (µs). 20 ms = 50 Hz.
pub const SERVO_FRAME_US: u16 = 20_000;

/// Pulse width at 0° (µs).
pub const SERVO_MIN_PULSE_US: u16 = 500;

/// Pulse width at 180° (µs).
pub const SERVO_MAX_PULSE_US: u16 = 2_500;

// BLE

/// Advertised GAP device name.
pub const BLE_DEVICE_NAME: &str = "Prosthetic Hand";

/// Hand control service UUID.
pub const BLE_SERVICE_UUID: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";

/// Command characteristic (write) UUID.
pub const BLE_COMMAND_CHAR_UUID: &str = "beb5483e-36e1-4688-b7f5-ea07361b26a8";

/// Battery characteristic (read + notify) UUID.
pub const BLE_BATTERY_CHAR_UUID: &str = "19b10001-e8f2-537e-4f6c-d104768a1214";

/// Advertising interval (in 0.625 ms units). 400 = 250 ms.
pub const BLE_ADV_INTERVAL: u32 = 400;

/// Longest command payload accepted over BLE (bytes).
pub const BLE_COMMAND_MAX_LEN: usize = 32;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button RELAX   → P0.11
//   Button PINCH   → P0.12
//   Button GRASP   → P0.24
//   Button POINT   → P0.25
//   Button INC     → P1.08
//   Button DEC     → P1.07
//   Servo THUMB    → P0.13
//   Servo INDEX    → P0.14
//   Servo FINGERS  → P0.15
//   Battery sense  → P0.04 (AIN2)

// Channels

/// Depth of the command queue shared by buttons and BLE.
pub const COMMAND_QUEUE_DEPTH: usize = 8;
