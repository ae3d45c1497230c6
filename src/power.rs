//! Battery monitoring - SAADC sampling and the telemetry task.
//!
//! The battery sense pin is read on a single-ended SAADC channel with
//! the VDD/4 reference and 1/4 gain, giving a 0 – 3.3 V full scale over
//! 12 bits.  Every `TELEMETRY_INTERVAL_MS` a report slot opens; if a BLE
//! central is attached the percentage is handed to the BLE task.

use crate::ble;
use defmt::{debug, info};
use embassy_nrf::saadc::Saadc;
use embassy_time::{Instant, Timer};
use prosthetic_hand::config::TELEMETRY_INTERVAL_MS;
use prosthetic_hand::telemetry::{battery_payload, BatteryGauge, ReportSlot, TelemetryReporter};

/// Battery monitor owning the SAADC.
pub struct BatteryMonitor {
    saadc: Saadc<'static, 1>,
    gauge: BatteryGauge,
}

impl BatteryMonitor {
    /// Calibrate the SAADC and wrap it.
    pub async fn new(saadc: Saadc<'static, 1>) -> Self {
        saadc.calibrate().await;
        Self {
            saadc,
            gauge: BatteryGauge::from_config(),
        }
    }

    /// Sample once and convert to a state-of-charge percentage.
    pub async fn read_percent(&mut self) -> u8 {
        let mut buf = [0i16; 1];
        self.saadc.sample(&mut buf).await;
        let mv = self.gauge.millivolts(buf[0]);
        let percent = self.gauge.percent_from_millivolts(mv);
        debug!("Battery: raw={} mv={} pct={}", buf[0], mv, percent);
        percent
    }
}

/// Telemetry task - runs forever on its own schedule.
pub async fn telemetry_task(mut monitor: BatteryMonitor) -> ! {
    let mut reporter = TelemetryReporter::new(TELEMETRY_INTERVAL_MS);

    loop {
        Timer::at(Instant::from_millis(reporter.next_due_ms())).await;

        match reporter.poll(Instant::now().as_millis(), ble::is_connected()) {
            ReportSlot::Due => {
                let percent = monitor.read_percent().await;
                info!("Battery report: {}%", percent);
                ble::publish_battery(battery_payload(percent));
            }
            ReportSlot::Skipped => debug!("Battery report skipped - no central"),
            ReportSlot::NotDue => {}
        }
    }
}
