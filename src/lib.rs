//! Client for the powerfox smart meter cloud API (version 2.0).
//!
//! ```no_run
//! let api = powerfox_rs::api::with_default_url("user".to_owned(), "secret".to_owned())?;
//! for device in powerfox_rs::api::devices(&api)? {
//!     println!("{}", device);
//! }
//! # Ok::<(), powerfox_rs::Error>(())
//! ```

pub mod api;
pub mod model;

pub use api::{Api, Error, ReportPeriod};
