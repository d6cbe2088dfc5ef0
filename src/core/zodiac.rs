//! Zodiac classification by birthday.
//!
//! The twelve ranges below partition every day of a leap year. Capricorn is
//! the only range that wraps around the new year.

use crate::domain::model::ZodiacSign;

/// Returned when no range claims a (month, day) pair.
pub const FALLBACK_SIGN: ZodiacSign = ZodiacSign::Aries;

/// Inclusive `(month, day)..=(month, day)` range for one sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacRange {
    pub sign: ZodiacSign,
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl ZodiacRange {
    const fn new(sign: ZodiacSign, start: (u32, u32), end: (u32, u32)) -> Self {
        Self { sign, start, end }
    }

    pub fn contains(&self, month: u32, day: u32) -> bool {
        let (start_month, start_day) = self.start;
        let (end_month, end_day) = self.end;

        if start_month == end_month {
            month == start_month && day >= start_day && day <= end_day
        } else {
            (month == start_month && day >= start_day) || (month == end_month && day <= end_day)
        }
    }
}

pub static ZODIAC_RANGES: [ZodiacRange; 12] = [
    ZodiacRange::new(ZodiacSign::Capricorn, (12, 22), (1, 19)),
    ZodiacRange::new(ZodiacSign::Aquarius, (1, 20), (2, 18)),
    ZodiacRange::new(ZodiacSign::Pisces, (2, 19), (3, 20)),
    ZodiacRange::new(ZodiacSign::Aries, (3, 21), (4, 19)),
    ZodiacRange::new(ZodiacSign::Taurus, (4, 20), (5, 20)),
    ZodiacRange::new(ZodiacSign::Gemini, (5, 21), (6, 20)),
    ZodiacRange::new(ZodiacSign::Cancer, (6, 21), (7, 22)),
    ZodiacRange::new(ZodiacSign::Leo, (7, 23), (8, 22)),
    ZodiacRange::new(ZodiacSign::Virgo, (8, 23), (9, 22)),
    ZodiacRange::new(ZodiacSign::Libra, (9, 23), (10, 22)),
    ZodiacRange::new(ZodiacSign::Scorpio, (10, 23), (11, 21)),
    ZodiacRange::new(ZodiacSign::Sagittarius, (11, 22), (12, 21)),
];

/// No range matched. Only reachable with an out-of-calendar input or a
/// broken range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmatched {
    pub month: u32,
    pub day: u32,
}

pub fn try_resolve(month: u32, day: u32) -> Result<ZodiacSign, Unmatched> {
    ZODIAC_RANGES
        .iter()
        .find(|range| range.contains(month, day))
        .map(|range| range.sign)
        .ok_or(Unmatched { month, day })
}

/// Resolves a sign, falling back to [`FALLBACK_SIGN`] when nothing matches.
pub fn resolve(month: u32, day: u32) -> ZodiacSign {
    match try_resolve(month, day) {
        Ok(sign) => sign,
        Err(unmatched) => {
            tracing::error!(
                "No zodiac range matched month={} day={}, using {}",
                unmatched.month,
                unmatched.day,
                FALLBACK_SIGN
            );
            debug_assert!(false, "zodiac ranges do not cover {:?}", unmatched);
            FALLBACK_SIGN
        }
    }
}
