pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileSource, HttpSource};
pub use config::toml_config::TomlConfig;
pub use core::{fetcher::HoroscopeFetcher, session::LookupSession};
pub use domain::model::{CalendarDate, HoroscopeReading, ZodiacSign};
pub use utils::error::{HoroscopeError, Result};
