use chrono::{DateTime, Utc};
use num_derive::FromPrimitive;
use serde::Serialize;
use serde_json::Value;

use std::fmt;

/// Physical unit of a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    #[serde(rename = "W")]
    Watt,
    #[serde(rename = "Wh")]
    WattHour,
    #[serde(rename = "kWh")]
    KilowattHour,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Watt => write!(f, "W"),
            Unit::WattHour => write!(f, "Wh"),
            Unit::KilowattHour => write!(f, "kWh"),
        }
    }
}

/// A number together with the unit the API reported it in.
///
/// The API itself sends bare numbers; which unit applies depends on the endpoint
/// and, for live meter counters, on the requested [`EnergyUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn watt(value: f64) -> Self {
        Quantity {
            value,
            unit: Unit::Watt,
        }
    }

    pub fn kilowatt_hours(value: f64) -> Self {
        Quantity {
            value,
            unit: Unit::KilowattHour,
        }
    }

    pub fn energy(value: f64, unit: EnergyUnit) -> Self {
        Quantity {
            value,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Unit of the cumulative counters of a live meter reading, selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnergyUnit {
    WattHours,
    KilowattHours,
}

impl Default for EnergyUnit {
    fn default() -> Self {
        EnergyUnit::WattHours
    }
}

impl EnergyUnit {
    /// Value of the `unit` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            EnergyUnit::WattHours => "Wh",
            EnergyUnit::KilowattHours => "kWh",
        }
    }
}

impl From<EnergyUnit> for Unit {
    fn from(unit: EnergyUnit) -> Self {
        match unit {
            EnergyUnit::WattHours => Unit::WattHour,
            EnergyUnit::KilowattHours => Unit::KilowattHour,
        }
    }
}

/// Meter types documented by powerfox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, Serialize)]
pub enum MeterType {
    NotSpecified = -1,
    PowerMeter = 0,
    ColdWaterMeter = 1,
    WarmWaterMeter = 2,
    WarmthMeter = 3,
    GasMeter = 4,
    ColdAndWarmWaterMeter = 5,
}

/// `Division` code of a device. Codes added by the vendor later are kept as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Division {
    Known(MeterType),
    Unknown(i64),
}

impl From<i64> for Division {
    fn from(code: i64) -> Self {
        match num::FromPrimitive::from_i64(code) {
            Some(meter_type) => Division::Known(meter_type),
            None => {
                log::warn!("unknown device division {}, keeping raw code", code);
                Division::Unknown(code)
            }
        }
    }
}

impl Division {
    pub fn code(&self) -> i64 {
        match self {
            Division::Known(meter_type) => *meter_type as i64,
            Division::Unknown(code) => *code,
        }
    }
}

/// Undocumented integer code passed through from the API unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RawCode(pub i64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: String,
    /// Name given to the device in the app.
    pub name: String,
    pub division: Division,
    pub account_associated_since: DateTime<Utc>,
    /// Measures consumption (and possibly feed-in), but not feed-in alone.
    pub is_main_device: bool,
    /// Bidirectional meter: measures consumption and feed-in.
    pub prosumer: bool,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device({} {})", self.name, self.id)
    }
}

/// Energy aggregated over one interval starting at `timestamp`.
///
/// An hourly delta stamped 10:00 covers 10:00 to 10:59, a quarter-hour delta
/// stamped 09:15 covers 09:15 to 09:29.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    /// Always kWh.
    pub delta: Quantity,
    pub timestamp: DateTime<Utc>,
    /// `true` if measured, `false` if calculated.
    pub complete: bool,
    pub delta_currency: RawCode,
    pub device_id: String,
    pub values_type: RawCode,
    /// High tariff share, two-tariff meters only.
    pub delta_ht: Option<Quantity>,
    /// Low tariff share, two-tariff meters only.
    pub delta_nt: Option<Quantity>,
}

/// Deltas of one energy category (consumption, feed-in or generation) over a report window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyFigures {
    pub sum: Quantity,
    pub max: Quantity,
    pub report_values: Vec<Delta>,
    pub start_time: DateTime<Utc>,
    pub start_time_currency: RawCode,
    pub sum_currency: RawCode,
    pub max_currency: RawCode,
    pub meter_readings: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalData {
    pub consumption: EnergyFigures,
    pub feed_in: EnergyFigures,
    /// Only reported for generating devices.
    pub generation: Option<EnergyFigures>,
}

/// Snapshot from the `current` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveMeterReading {
    pub watt: Quantity,
    pub timestamp: DateTime<Utc>,
    /// Consumption counter, in the requested unit.
    pub a_plus: Quantity,
    /// Feed-in counter, in the requested unit.
    pub a_minus: Quantity,
    /// Set by the API when `timestamp` is more than 60 seconds old.
    pub outdated: bool,
    pub a_plus_ht: Option<Quantity>,
    pub a_plus_nt: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Power {
    pub timestamp: DateTime<Utc>,
    pub value: Quantity,
}

/// Power draw of the last hour in 2 minute steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalMeterReading {
    pub max: Quantity,
    pub min: Quantity,
    pub avg: Quantity,
    pub values: Vec<Power>,
    pub device_id: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn division_known_codes() {
        assert_eq!(Division::Known(MeterType::NotSpecified), Division::from(-1));
        assert_eq!(Division::Known(MeterType::PowerMeter), Division::from(0));
        assert_eq!(
            Division::Known(MeterType::ColdAndWarmWaterMeter),
            Division::from(5)
        );
    }

    #[test]
    fn division_unknown_code_is_kept() {
        let division = Division::from(42);
        assert_eq!(Division::Unknown(42), division);
        assert_eq!(42, division.code());
        assert_eq!(4, Division::from(4).code());
    }

    #[test]
    fn energy_unit_param() {
        assert_eq!(EnergyUnit::WattHours, EnergyUnit::default());
        assert_eq!("kWh", EnergyUnit::KilowattHours.as_param());
        assert_eq!(Unit::WattHour, Unit::from(EnergyUnit::WattHours));
    }

    #[test]
    fn quantity_display() {
        assert_eq!("3.5 kWh", Quantity::kilowatt_hours(3.5).to_string());
        assert_eq!("230 W", Quantity::watt(230.0).to_string());
    }
}
