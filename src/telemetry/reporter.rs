//! Fixed-cadence battery reporting.
//!
//! A report slot opens every `interval_ms` from startup.  If a peer is
//! connected when the slot opens, one `BAT:<percent>` notification is
//! sent.  Otherwise the slot is dropped: nothing is queued, and
//! reconnecting does not replay missed slots.

use core::fmt::Write;
use heapless::String;

/// Longest notification payload: `BAT:100`.
pub const BATTERY_PAYLOAD_LEN: usize = 8;

/// What happened when the reporter was polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportSlot {
    /// The next slot has not opened yet.
    NotDue,
    /// A slot opened but no peer is attached.
    Skipped,
    /// A slot opened with a peer attached; send a report now.
    Due,
}

#[derive(Clone, Debug)]
pub struct TelemetryReporter {
    interval_ms: u64,
    next_due_ms: u64,
}

impl TelemetryReporter {
    pub const fn new(interval_ms: u64) -> Self {
        let interval_ms = if interval_ms == 0 { 1 } else { interval_ms };
        Self {
            interval_ms,
            next_due_ms: interval_ms,
        }
    }

    /// Instant the next slot opens (ms since startup).
    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }

    /// Check the schedule at `now_ms`.
    ///
    /// Slots that opened and closed while nobody polled are skipped, so
    /// at most one report results from a single call.
    pub fn poll(&mut self, now_ms: u64, connected: bool) -> ReportSlot {
        if now_ms < self.next_due_ms {
            return ReportSlot::NotDue;
        }

        let elapsed_slots = (now_ms - self.next_due_ms) / self.interval_ms + 1;
        self.next_due_ms += elapsed_slots * self.interval_ms;

        if connected {
            ReportSlot::Due
        } else {
            ReportSlot::Skipped
        }
    }
}

/// How a battery report reaches the central.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// Update the readable value only.
    Store,
    /// Update the value and send a notification.
    StoreAndNotify,
}

/// Battery characteristic subscription for one connection.
///
/// Notifications start disabled and follow the central's CCCD writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatterySubscription {
    notify: bool,
}

impl BatterySubscription {
    pub const fn new() -> Self {
        Self { notify: false }
    }

    /// Record a CCCD write from the central.
    pub fn set_notify(&mut self, enabled: bool) {
        self.notify = enabled;
    }

    pub fn delivery(&self) -> Delivery {
        if self.notify {
            Delivery::StoreAndNotify
        } else {
            Delivery::Store
        }
    }
}

/// Notification payload for a battery percentage.
pub fn battery_payload(percent: u8) -> String<BATTERY_PAYLOAD_LEN> {
    let mut payload = String::new();
    // "BAT:" plus at most three digits always fits.
    let _ = write!(payload, "BAT:{}", percent.min(100));
    payload
}
