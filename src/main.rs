use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use config::Config;
use powerfox_rs::api::{self, Api, API_URL};
use powerfox_rs::model::EnergyUnit;
use serde::Serialize;
use serde_json::Value;

use std::process;

#[derive(Clone, serde::Deserialize)]
pub struct PowerfoxConfig {
    api_url: String,
    username: String,
    password: String,
}

/// Query the powerfox cloud API. Credentials are read from `POWERFOX_USERNAME`
/// and `POWERFOX_PASSWORD`, the API root from `POWERFOX_API_URL`.
#[derive(Parser)]
#[command(name = "powerfox", version)]
struct Args {
    /// Print the unparsed API response
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List devices associated with the account
    Devices,
    /// Consumption, feed-in and generation report (kWh)
    Report {
        /// Device id, `main` or `all`
        #[arg(long)]
        device: Option<String>,
        /// Hourly values of this day instead of the last 24 hours
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Live meter reading
    Current {
        #[arg(long)]
        device: Option<String>,
        /// Meter counters in kWh instead of Wh
        #[arg(long)]
        kwh: bool,
    },
    /// Power draw of the last hour (W)
    Operating {
        #[arg(long)]
        device: Option<String>,
    },
}

pub fn read_settings() -> Result<PowerfoxConfig, config::ConfigError> {
    let mut settings = Config::default();
    settings
        .set_default("api_url", API_URL)?
        .merge(config::Environment::with_prefix("POWERFOX"))?;

    settings.try_into()
}

fn print<T: Serialize>(value: &T) -> Result<(), api::Error> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|e| api::Error::InternalError(format!("unable to serialize output: {}", e)))?;
    println!("{}", output);
    Ok(())
}

fn run(api: &Api, args: Args) -> Result<(), api::Error> {
    let raw = args.raw;
    let print_raw = |value: Result<Value, api::Error>| value.and_then(|v| print(&v));

    match args.command {
        Command::Devices if raw => print_raw(api::devices_raw(api)),
        Command::Devices => print(&api::devices(api)?),
        Command::Report { device, date } if raw => {
            print_raw(api::historical_data_raw(api, device.as_deref(), date))
        }
        Command::Report { device, date } => {
            print(&api::historical_data(api, device.as_deref(), date)?)
        }
        Command::Current { device, kwh } => {
            let unit = if kwh {
                EnergyUnit::KilowattHours
            } else {
                EnergyUnit::WattHours
            };
            if raw {
                print_raw(api::live_meter_reading_raw(api, device.as_deref(), unit))
            } else {
                print(&api::live_meter_reading(api, device.as_deref(), unit)?)
            }
        }
        Command::Operating { device } if raw => {
            print_raw(api::historical_meter_reading_raw(api, device.as_deref()))
        }
        Command::Operating { device } => {
            print(&api::historical_meter_reading(api, device.as_deref())?)
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let settings = match read_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let result = api::api(settings.api_url, settings.username, settings.password)
        .and_then(|api| run(&api, args));

    if let Err(e) = result {
        log::error!("{}", e);
        process::exit(1);
    }
}
