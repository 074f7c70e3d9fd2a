//! Mapping of powerfox JSON payloads onto [`crate::model`] records.
//!
//! Every function takes one JSON node and returns one record or an
//! [`Error`]. Required keys must be present; optional keys are `None` when
//! absent or `null`.

mod current;
mod device;
mod operating;
mod report;

pub use current::live_meter_reading;
pub use device::{device, devices};
pub use operating::{historical_meter_reading, power};
pub use report::{delta, energy_figures, historical_data};

use super::Error;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Key lookup on one JSON object, with errors naming the entity being built.
pub(crate) struct Fields<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(entity: &'static str, value: &'a Value) -> Result<Self, Error> {
        value
            .as_object()
            .map(|map| Fields { entity, map })
            .ok_or(Error::UnexpectedApiResponse {
                entity,
                expected: "a JSON object",
            })
    }

    fn get(&self, field: &'static str) -> Result<&'a Value, Error> {
        self.map.get(field).ok_or(Error::MissingField {
            entity: self.entity,
            field,
        })
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> Error {
        Error::InvalidField {
            entity: self.entity,
            field,
            expected,
        }
    }

    pub fn value(&self, field: &'static str) -> Result<&'a Value, Error> {
        self.get(field)
    }

    /// `None` when the key is absent or `null`.
    pub fn optional_value(&self, field: &'static str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub fn string(&self, field: &'static str) -> Result<String, Error> {
        self.get(field)?
            .as_str()
            .map(String::from)
            .ok_or_else(|| self.invalid(field, "a string"))
    }

    pub fn bool(&self, field: &'static str) -> Result<bool, Error> {
        self.get(field)?
            .as_bool()
            .ok_or_else(|| self.invalid(field, "a boolean"))
    }

    pub fn i64(&self, field: &'static str) -> Result<i64, Error> {
        self.get(field)?
            .as_i64()
            .ok_or_else(|| self.invalid(field, "an integer"))
    }

    pub fn f64(&self, field: &'static str) -> Result<f64, Error> {
        self.get(field)?
            .as_f64()
            .ok_or_else(|| self.invalid(field, "a number"))
    }

    pub fn optional_f64(&self, field: &'static str) -> Result<Option<f64>, Error> {
        self.optional_value(field)
            .map(|v| v.as_f64().ok_or_else(|| self.invalid(field, "a number")))
            .transpose()
    }

    /// UNIX seconds, interpreted as UTC.
    pub fn timestamp(&self, field: &'static str) -> Result<DateTime<Utc>, Error> {
        let seconds = self
            .get(field)?
            .as_i64()
            .ok_or_else(|| self.invalid(field, "a UNIX timestamp"))?;
        Utc.timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| self.invalid(field, "a UNIX timestamp in range"))
    }

    pub fn array(&self, field: &'static str) -> Result<&'a Vec<Value>, Error> {
        self.get(field)?
            .as_array()
            .ok_or_else(|| self.invalid(field, "an array"))
    }
}

#[cfg(test)]
pub(crate) fn read_resource(filename: &str) -> Value {
    use std::fs;
    use std::path::PathBuf;

    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push(format!("resources/test/{}", filename));
    serde_json::from_str(&fs::read_to_string(d.as_path()).unwrap()).unwrap()
}
