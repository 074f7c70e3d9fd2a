/// Path below the API root, one entry per segment. Segments are percent-encoded
/// when the request URL is built.
pub type Endpoint<'a> = [&'a str];

/// Alias for the account's primary device.
pub const MAIN_DEVICE: &str = "main";
/// Alias summing all devices of the account (report endpoint only).
pub const ALL_DEVICES: &str = "all";

pub const DEVICES: &Endpoint<'static> = &["my", ALL_DEVICES, "devices"];

pub fn report(device_id: &str) -> [&str; 3] {
    ["my", device_id, "report"]
}

pub fn current(device_id: &str) -> [&str; 3] {
    ["my", device_id, "current"]
}

pub fn operating(device_id: &str) -> [&str; 3] {
    ["my", device_id, "operating"]
}
