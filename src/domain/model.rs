use crate::utils::error::{HoroscopeError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A birthday as selected in the picker. Always a real calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDate", into = "RawDate")]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Serialize, Deserialize)]
struct RawDate {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<RawDate> for CalendarDate {
    type Error = HoroscopeError;

    fn try_from(raw: RawDate) -> Result<Self> {
        CalendarDate::new(raw.year, raw.month, raw.day)
    }
}

impl From<CalendarDate> for RawDate {
    fn from(date: CalendarDate) -> Self {
        RawDate {
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(HoroscopeError::InvalidDateError { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Moves to another year, clamping the day (Feb 29 -> Feb 28).
    pub fn with_year(self, year: i32) -> Result<Self> {
        let last = days_in_month(year, self.month);
        if last == 0 {
            return Err(HoroscopeError::InvalidDateError {
                year,
                month: self.month,
                day: self.day,
            });
        }
        Self::new(year, self.month, self.day.min(last))
    }

    /// Moves to another month, clamping the day to the month's length.
    pub fn with_month(self, month: u32) -> Result<Self> {
        let last = days_in_month(self.year, month);
        if last == 0 {
            return Err(HoroscopeError::InvalidDateError {
                year: self.year,
                month,
                day: self.day,
            });
        }
        Self::new(self.year, month, self.day.min(last))
    }

    pub fn with_day(self, day: u32) -> Result<Self> {
        Self::new(self.year, self.month, day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Number of days in `month` of `year`, or 0 when the month is outside
/// 1..=12 or the year is outside chrono's calendar.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let next = if month == 12 {
        year.checked_add(1).map(|next_year| (next_year, 1))
    } else {
        Some((year, month + 1))
    };
    next.and_then(|(next_year, next_month)| NaiveDate::from_ymd_opt(next_year, next_month, 1))
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    #[serde(rename = "염소자리")]
    Capricorn,
    #[serde(rename = "물병자리")]
    Aquarius,
    #[serde(rename = "물고기자리")]
    Pisces,
    #[serde(rename = "양자리")]
    Aries,
    #[serde(rename = "황소자리")]
    Taurus,
    #[serde(rename = "쌍둥이자리")]
    Gemini,
    #[serde(rename = "게자리")]
    Cancer,
    #[serde(rename = "사자자리")]
    Leo,
    #[serde(rename = "처녀자리")]
    Virgo,
    #[serde(rename = "천칭자리")]
    Libra,
    #[serde(rename = "전갈자리")]
    Scorpio,
    #[serde(rename = "사수자리")]
    Sagittarius,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
    ];

    /// The label used as a key in the horoscope document.
    pub fn label(&self) -> &'static str {
        match self {
            ZodiacSign::Capricorn => "염소자리",
            ZodiacSign::Aquarius => "물병자리",
            ZodiacSign::Pisces => "물고기자리",
            ZodiacSign::Aries => "양자리",
            ZodiacSign::Taurus => "황소자리",
            ZodiacSign::Gemini => "쌍둥이자리",
            ZodiacSign::Cancer => "게자리",
            ZodiacSign::Leo => "사자자리",
            ZodiacSign::Virgo => "처녀자리",
            ZodiacSign::Libra => "천칭자리",
            ZodiacSign::Scorpio => "전갈자리",
            ZodiacSign::Sagittarius => "사수자리",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sign| sign.label() == label)
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a successful lookup shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoroscopeReading {
    pub sign: ZodiacSign,
    pub bucket: String,
    pub text: String,
}

/// `bucket date -> sign label -> text`, parsed fresh on every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoroscopeDocument {
    buckets: HashMap<String, HashMap<String, String>>,
}

impl HoroscopeDocument {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn lookup(&self, bucket: &str, sign: ZodiacSign) -> Result<&str> {
        self.buckets
            .get(bucket)
            .and_then(|signs| signs.get(sign.label()))
            .map(String::as_str)
            .ok_or_else(|| HoroscopeError::LookupError {
                bucket: bucket.to_string(),
                sign: sign.label().to_string(),
            })
    }

    pub fn bucket_keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Keys under `bucket` that are not one of the twelve sign labels.
    pub fn unknown_sign_keys(&self, bucket: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .buckets
            .get(bucket)
            .map(|signs| {
                signs
                    .keys()
                    .map(String::as_str)
                    .filter(|key| ZodiacSign::from_label(key).is_none())
                    .collect()
            })
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}
