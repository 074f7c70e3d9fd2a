pub mod endpoint;
pub mod error;
pub mod response;

use crate::model;
use chrono::{Datelike, NaiveDate};
pub use error::Error;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde_json::Value;

use std::fmt;

pub const API_URL: &str = "https://backend.powerfox.energy/api/2.0";

type Query = Vec<(&'static str, String)>;

/// Credentials and base URL. Holds no per-call state, so one `Api` can be
/// shared between threads.
#[derive(Clone)]
pub struct Api {
    api_url: Url,
    username: String,
    password: String,
    client: Client,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .finish()
    }
}

pub fn api(api_url: String, username: String, password: String) -> Result<Api, Error> {
    let invalid_url = |reason: String| Error::InvalidApiUrl(api_url.clone(), reason);
    let parsed_url = Url::parse(&api_url).map_err(|e| invalid_url(e.to_string()))?;
    if parsed_url.cannot_be_a_base() {
        return Err(invalid_url("not a base URL".to_owned()));
    }

    let client = Client::builder()
        .build()
        .map_err(|e| Error::InternalError(format!("unable to set up HTTP client: {}", e)))?;

    Ok(Api {
        api_url: parsed_url,
        username,
        password,
        client,
    })
}

pub fn with_default_url(username: String, password: String) -> Result<Api, Error> {
    api(API_URL.to_owned(), username, password)
}

/// Time window of a report. Without parameters the API returns hourly
/// deltas of the last 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Last24Hours,
    /// Monthly values of one year.
    Year(i32),
    /// Daily values of one month.
    Month { year: i32, month: u32 },
    /// Hourly values of one day.
    Day(NaiveDate),
    /// 15 minute values for six hours starting at `from_hour`.
    Hours { day: NaiveDate, from_hour: u32 },
}

impl From<Option<NaiveDate>> for ReportPeriod {
    fn from(day: Option<NaiveDate>) -> Self {
        match day {
            Some(day) => ReportPeriod::Day(day),
            None => ReportPeriod::Last24Hours,
        }
    }
}

impl ReportPeriod {
    fn query(&self) -> Query {
        let day_query = |day: &NaiveDate| {
            vec![
                ("year", day.year().to_string()),
                ("month", day.month().to_string()),
                ("day", day.day().to_string()),
            ]
        };

        match self {
            ReportPeriod::Last24Hours => vec![],
            ReportPeriod::Year(year) => vec![("year", year.to_string())],
            ReportPeriod::Month { year, month } => {
                vec![("year", year.to_string()), ("month", month.to_string())]
            }
            ReportPeriod::Day(day) => day_query(day),
            ReportPeriod::Hours { day, from_hour } => {
                let mut query = day_query(day);
                query.push(("fromhour", from_hour.to_string()));
                query
            }
        }
    }
}

/// `unit` is only sent when it differs from the API default (Wh).
fn unit_query(unit: model::EnergyUnit) -> Query {
    match unit {
        model::EnergyUnit::WattHours => vec![],
        other => vec![("unit", other.as_param().to_owned())],
    }
}

/// `None` and the empty id both address the main device.
fn device_or_main(device_id: Option<&str>) -> &str {
    device_id
        .filter(|id| !id.is_empty())
        .unwrap_or(endpoint::MAIN_DEVICE)
}

/// Appends `endpoint` to the API root. Each segment is percent-encoded, so a
/// device id containing `/`, `?` or `#` stays inside its segment.
fn endpoint_url(api: &Api, endpoint: &endpoint::Endpoint) -> Url {
    let mut url = api.api_url.clone();
    /* cannot-be-a-base URLs are rejected in `api()` */
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(endpoint.iter());
    }
    url
}

fn request(
    api: &Api,
    endpoint: &endpoint::Endpoint,
    query: &[(&str, String)],
) -> RequestBuilder {
    let url = endpoint_url(api, endpoint);
    let request = api
        .client
        .get(url)
        .basic_auth(&api.username, Some(&api.password));

    if query.is_empty() {
        request
    } else {
        request.query(query)
    }
}

/// GET `endpoint` and return the JSON body. Non-2xx responses are returned as
/// `Error::Http` without looking at the body.
fn get(
    api: &Api,
    endpoint: &endpoint::Endpoint,
    query: &[(&str, String)],
) -> Result<Value, Error> {
    let path = endpoint.join("/");
    log::debug!("GET {}, query: {:?}", path, query);

    let response = request(api, endpoint, query).send()?;
    let status = response.status();
    let response_text = response
        .text()
        .map_err(|e| Error::Transport(format!("Error reading API response: {}", e)))?;

    log::trace!(
        "endpoint: {}, status: {}, response_text: {}",
        path,
        status,
        response_text
    );

    if !status.is_success() {
        return Err(Error::Http {
            status,
            body: response_text,
        });
    }

    serde_json::from_str::<Value>(&response_text)
        .map_err(|e| Error::InvalidResponse(response_text, e.to_string()))
}

pub fn devices_raw(api: &Api) -> Result<Value, Error> {
    get(api, endpoint::DEVICES, &[])
}

/// All devices associated with the account.
pub fn devices(api: &Api) -> Result<Vec<model::Device>, Error> {
    devices_raw(api).and_then(|json| response::devices(&json))
}

pub fn report_raw(
    api: &Api,
    device_id: Option<&str>,
    period: ReportPeriod,
) -> Result<Value, Error> {
    get(
        api,
        &endpoint::report(device_or_main(device_id)),
        &period.query(),
    )
}

/// Consumption, feed-in and (for generating devices) generation deltas in kWh
/// for `period`. Pass [`endpoint::ALL_DEVICES`] as `device_id` to sum all devices.
pub fn report(
    api: &Api,
    device_id: Option<&str>,
    period: ReportPeriod,
) -> Result<model::HistoricalData, Error> {
    report_raw(api, device_id, period).and_then(|json| response::historical_data(&json))
}

pub fn historical_data_raw(
    api: &Api,
    device_id: Option<&str>,
    day: Option<NaiveDate>,
) -> Result<Value, Error> {
    report_raw(api, device_id, day.into())
}

/// Hourly report of `day`, or of the last 24 hours when `day` is `None`.
pub fn historical_data(
    api: &Api,
    device_id: Option<&str>,
    day: Option<NaiveDate>,
) -> Result<model::HistoricalData, Error> {
    report(api, device_id, day.into())
}

pub fn live_meter_reading_raw(
    api: &Api,
    device_id: Option<&str>,
    unit: model::EnergyUnit,
) -> Result<Value, Error> {
    get(
        api,
        &endpoint::current(device_or_main(device_id)),
        &unit_query(unit),
    )
}

/// Current power draw and meter counters, counters in `unit`.
pub fn live_meter_reading(
    api: &Api,
    device_id: Option<&str>,
    unit: model::EnergyUnit,
) -> Result<model::LiveMeterReading, Error> {
    live_meter_reading_raw(api, device_id, unit)
        .and_then(|json| response::live_meter_reading(&json, unit))
}

pub fn historical_meter_reading_raw(api: &Api, device_id: Option<&str>) -> Result<Value, Error> {
    get(api, &endpoint::operating(device_or_main(device_id)), &[])
}

/// Power draw (W) of the last hour.
pub fn historical_meter_reading(
    api: &Api,
    device_id: Option<&str>,
) -> Result<model::HistoricalMeterReading, Error> {
    historical_meter_reading_raw(api, device_id)
        .and_then(|json| response::historical_meter_reading(&json))
}
