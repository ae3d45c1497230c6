//! Host-testable core of the prosthetic hand firmware.
//!
//! Everything here is pure logic: the mode state machine, the motion
//! interpolator, button edge detection, command parsing and the battery
//! telemetry schedule.  None of it touches hardware, so it builds and
//! tests on the host.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and wires these modules to the SoftDevice, PWM, GPIO and SAADC.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod actuator;
pub mod config;
pub mod hand;
pub mod input;
pub mod telemetry;
