//! Battery telemetry: ADC scaling and the report schedule.

pub mod battery;
pub mod reporter;

pub use battery::BatteryGauge;
pub use reporter::{battery_payload, BatterySubscription, Delivery, ReportSlot, TelemetryReporter};
