//! Choices offered by the year / month / day wheels.

use crate::domain::model::days_in_month;

/// How many years back from the current year the year wheel reaches.
pub const YEAR_SPAN: i32 = 100;

/// Newest first, `current_year` down to `current_year - YEAR_SPAN`.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (current_year - YEAR_SPAN..=current_year).rev().collect()
}

pub fn month_options() -> Vec<u32> {
    (1..=12).collect()
}

pub fn day_options(year: i32, month: u32) -> Vec<u32> {
    (1..=days_in_month(year, month)).collect()
}
