use super::{Error, Fields};
use crate::model::{EnergyUnit, LiveMeterReading, Quantity};
use serde_json::Value;

/// `unit` must be the unit the reading was requested in; the payload does not carry it.
pub fn live_meter_reading(json: &Value, unit: EnergyUnit) -> Result<LiveMeterReading, Error> {
    let fields = Fields::of("LiveMeterReading", json)?;
    let energy = |value| Quantity::energy(value, unit);

    Ok(LiveMeterReading {
        watt: Quantity::watt(fields.f64("Watt")?),
        timestamp: fields.timestamp("Timestamp")?,
        a_plus: energy(fields.f64("A_Plus")?),
        a_minus: energy(fields.f64("A_Minus")?),
        outdated: fields.bool("Outdated")?,
        a_plus_ht: fields.optional_f64("A_Plus_HT")?.map(energy),
        a_plus_nt: fields.optional_f64("A_Plus_NT")?.map(energy),
    })
}

#[cfg(test)]
mod test {
    use super::super::read_resource;
    use super::*;
    use crate::model::Unit;

    #[test]
    fn watt_hours_by_default() {
        let reading =
            live_meter_reading(&read_resource("current.json"), EnergyUnit::default()).unwrap();

        assert_eq!(Quantity::watt(412.0), reading.watt);
        assert_eq!(Unit::WattHour, reading.a_plus.unit);
        assert_eq!(5123456.5, reading.a_plus.value);
        assert_eq!(10234.0, reading.a_minus.value);
        assert!(!reading.outdated);
        assert_eq!(None, reading.a_plus_ht);
        assert_eq!(None, reading.a_plus_nt);
    }

    #[test]
    fn kilowatt_hours_two_tariff() {
        let reading = live_meter_reading(
            &read_resource("current_kwh_two_tariff.json"),
            EnergyUnit::KilowattHours,
        )
        .unwrap();

        assert_eq!(98.5, reading.watt.value);
        assert_eq!(Unit::KilowattHour, reading.a_minus.unit);
        assert!(reading.outdated);
        assert_eq!(
            Some(Quantity {
                value: 4000.1,
                unit: Unit::KilowattHour
            }),
            reading.a_plus_ht
        );
        assert_eq!(Some(1123.3565), reading.a_plus_nt.map(|q| q.value));
    }

    #[test]
    fn missing_outdated_flag() {
        let mut json = read_resource("current.json");
        json.as_object_mut().unwrap().remove("Outdated");

        assert!(matches!(
            live_meter_reading(&json, EnergyUnit::WattHours),
            Err(Error::MissingField {
                entity: "LiveMeterReading",
                field: "Outdated"
            })
        ));
    }
}
