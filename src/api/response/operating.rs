use super::{Error, Fields};
use crate::model::{HistoricalMeterReading, Power, Quantity};
use serde_json::Value;

pub fn power(json: &Value) -> Result<Power, Error> {
    let fields = Fields::of("Power", json)?;

    Ok(Power {
        timestamp: fields.timestamp("Timestamp")?,
        value: Quantity::watt(fields.f64("Value")?),
    })
}

pub fn historical_meter_reading(json: &Value) -> Result<HistoricalMeterReading, Error> {
    let fields = Fields::of("HistoricalMeterReading", json)?;

    Ok(HistoricalMeterReading {
        max: Quantity::watt(fields.f64("Max")?),
        min: Quantity::watt(fields.f64("Min")?),
        avg: Quantity::watt(fields.f64("Avg")?),
        values: fields
            .array("Values")?
            .iter()
            .map(power)
            .collect::<Result<_, _>>()?,
        device_id: fields.string("DeviceId")?,
    })
}
