//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **GATT server** - one hand service with a write-only command
//!    characteristic and a read/notify battery characteristic.
//! 2. **Peripheral task** - advertises, accepts one central at a time,
//!    forwards command writes to the control task and pushes battery
//!    reports while connected.  Re-advertises after every disconnect.
//!
//! The connection flag and the battery report slot below are the only
//! state shared with other tasks.

pub mod gatt;
pub mod peripheral;

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use heapless::String;
use prosthetic_hand::telemetry::reporter::BATTERY_PAYLOAD_LEN;

/// Battery notification payload (`BAT:<percent>`).
pub type BatteryPayload = String<BATTERY_PAYLOAD_LEN>;

static CONNECTED: AtomicBool = AtomicBool::new(false);
static BATTERY_REPORT: Signal<CriticalSectionRawMutex, BatteryPayload> = Signal::new();

/// Whether a central is currently attached.
pub fn is_connected() -> bool {
    CONNECTED.load(Ordering::Relaxed)
}

fn set_connected(connected: bool) {
    CONNECTED.store(connected, Ordering::Relaxed);
}

/// Hand a battery report to the peripheral task.
///
/// Only the latest report is kept; it is discarded on disconnect so a
/// report is never delivered to a later connection.
pub fn publish_battery(payload: BatteryPayload) {
    BATTERY_REPORT.signal(payload);
}

fn battery_report() -> &'static Signal<CriticalSectionRawMutex, BatteryPayload> {
    &BATTERY_REPORT
}
