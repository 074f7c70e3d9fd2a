use super::{Error, Fields};
use crate::model::{Delta, EnergyFigures, HistoricalData, Quantity, RawCode};
use serde_json::Value;

pub fn delta(json: &Value) -> Result<Delta, Error> {
    let fields = Fields::of("Delta", json)?;

    Ok(Delta {
        delta: Quantity::kilowatt_hours(fields.f64("Delta")?),
        timestamp: fields.timestamp("Timestamp")?,
        complete: fields.bool("Complete")?,
        delta_currency: RawCode(fields.i64("DeltaCurrency")?),
        device_id: fields.string("DeviceId")?,
        values_type: RawCode(fields.i64("ValuesType")?),
        delta_ht: fields.optional_f64("DeltaHT")?.map(Quantity::kilowatt_hours),
        delta_nt: fields.optional_f64("DeltaNT")?.map(Quantity::kilowatt_hours),
    })
}

pub fn energy_figures(json: &Value) -> Result<EnergyFigures, Error> {
    let fields = Fields::of("EnergyFigures", json)?;

    Ok(EnergyFigures {
        sum: Quantity::kilowatt_hours(fields.f64("Sum")?),
        max: Quantity::kilowatt_hours(fields.f64("Max")?),
        report_values: fields
            .array("ReportValues")?
            .iter()
            .map(delta)
            .collect::<Result<_, _>>()?,
        start_time: fields.timestamp("StartTime")?,
        start_time_currency: RawCode(fields.i64("StartTimeCurrency")?),
        sum_currency: RawCode(fields.i64("SumCurrency")?),
        max_currency: RawCode(fields.i64("MaxCurrency")?),
        meter_readings: fields.array("MeterReadings")?.to_owned(),
    })
}

pub fn historical_data(json: &Value) -> Result<HistoricalData, Error> {
    let fields = Fields::of("HistoricalData", json)?;

    Ok(HistoricalData {
        consumption: energy_figures(fields.value("Consumption")?)?,
        feed_in: energy_figures(fields.value("FeedIn")?)?,
        generation: fields
            .optional_value("Generation")
            .map(energy_figures)
            .transpose()?,
    })
}
