pub mod bucket;
pub mod fetcher;
pub mod picker;
pub mod presenter;
pub mod session;
pub mod zodiac;

pub use crate::domain::model::{CalendarDate, HoroscopeDocument, HoroscopeReading, ZodiacSign};
pub use crate::domain::ports::{ConfigProvider, HoroscopeSource};
pub use crate::utils::error::Result;
