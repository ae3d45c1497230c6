//! Battery level estimate from the sense pin.
//!
//! The ADC reading is scaled to millivolts, multiplied back up by the
//! sense divider, then mapped linearly from the 3.3 V – 4.2 V operating
//! band onto 0 – 100 %.

use crate::config::{
    BATTERY_ADC_FULL_SCALE_MV, BATTERY_ADC_MAX_COUNT, BATTERY_DIVIDER_RATIO, BATTERY_EMPTY_MV,
    BATTERY_FULL_MV,
};

/// Conversion parameters for one battery sense channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryGauge {
    /// Voltage at the ADC's full-scale count (mV).
    pub full_scale_mv: u32,
    /// Full-scale ADC count.
    pub max_count: u32,
    /// Resistor divider ratio between the cell and the pin.
    pub divider: u32,
    /// Cell voltage reported as 0 % (mV).
    pub empty_mv: u32,
    /// Cell voltage reported as 100 % (mV).
    pub full_mv: u32,
}

impl BatteryGauge {
    pub const fn from_config() -> Self {
        Self {
            full_scale_mv: BATTERY_ADC_FULL_SCALE_MV,
            max_count: BATTERY_ADC_MAX_COUNT,
            divider: BATTERY_DIVIDER_RATIO,
            empty_mv: BATTERY_EMPTY_MV,
            full_mv: BATTERY_FULL_MV,
        }
    }

    /// Cell voltage for a raw ADC sample (mV).  Negative samples (SAADC
    /// noise around 0 V) read as 0; samples past full scale saturate.
    pub fn millivolts(&self, raw: i16) -> u32 {
        if self.max_count == 0 {
            return 0;
        }
        let raw = (raw.max(0) as u32).min(self.max_count);
        raw * self.full_scale_mv * self.divider / self.max_count
    }

    /// State of charge for a cell voltage, clamped to `0..=100`.
    pub fn percent_from_millivolts(&self, mv: u32) -> u8 {
        if mv <= self.empty_mv || self.full_mv <= self.empty_mv {
            return 0;
        }
        if mv >= self.full_mv {
            return 100;
        }
        ((mv - self.empty_mv) * 100 / (self.full_mv - self.empty_mv)) as u8
    }

    /// State of charge for a raw ADC sample.
    pub fn percent(&self, raw: i16) -> u8 {
        self.percent_from_millivolts(self.millivolts(raw))
    }
}

impl Default for BatteryGauge {
    fn default() -> Self {
        Self::from_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(divider: u32) -> BatteryGauge {
        BatteryGauge {
            divider,
            ..BatteryGauge::from_config()
        }
    }

    #[test]
    fn millivolts_scale_with_reference() {
        let g = gauge(1);
        assert_eq!(g.millivolts(0), 0);
        assert_eq!(g.millivolts(4095), 3_300);
        assert_eq!(g.millivolts(2048), 1_650);
        assert_eq!(g.millivolts(-12), 0);
    }

    #[test]
    fn percent_band_edges() {
        let g = gauge(1);
        assert_eq!(g.percent_from_millivolts(0), 0);
        assert_eq!(g.percent_from_millivolts(3_300), 0);
        assert_eq!(g.percent_from_millivolts(3_750), 50);
        assert_eq!(g.percent_from_millivolts(4_200), 100);
        assert_eq!(g.percent_from_millivolts(5_000), 100);
    }

    #[test]
    fn percent_is_linear_inside_band() {
        let g = gauge(1);
        assert_eq!(g.percent_from_millivolts(3_390), 10);
        assert_eq!(g.percent_from_millivolts(4_110), 90);
        assert_eq!(g.percent_from_millivolts(3_309), 1);
    }

    #[test]
    fn direct_wiring_never_exceeds_zero() {
        // Without a divider the pin saturates at the 3.3 V reference,
        // which is the bottom of the band.
        let g = gauge(1);
        assert_eq!(g.percent(i16::MAX), 0);
        assert_eq!(g.percent(4095), 0);
    }

    #[test]
    fn halving_divider_reaches_full_charge() {
        let g = gauge(2);
        // 4.2 V cell → 2.1 V at the pin → 2606 counts.
        assert_eq!(g.percent(2606), 100);
        // 3.75 V cell → 1.875 V at the pin → 2327 counts.
        assert_eq!(g.percent(2327), 50);
        assert_eq!(g.percent(1000), 0);
    }
}
