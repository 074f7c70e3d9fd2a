use super::{Error, Fields};
use crate::model::{Device, Division};
use serde_json::Value;

pub fn device(json: &Value) -> Result<Device, Error> {
    let fields = Fields::of("Device", json)?;

    Ok(Device {
        id: fields.string("DeviceId")?,
        name: fields.string("Name")?,
        division: Division::from(fields.i64("Division")?),
        account_associated_since: fields.timestamp("AccountAssociatedSince")?,
        is_main_device: fields.bool("MainDevice")?,
        prosumer: fields.bool("Prosumer")?,
    })
}

/// Body of `/my/all/devices`, order preserved.
pub fn devices(json: &Value) -> Result<Vec<Device>, Error> {
    json.as_array()
        .ok_or(Error::UnexpectedApiResponse {
            entity: "Device list",
            expected: "a JSON array",
        })?
        .iter()
        .map(device)
        .collect()
}
