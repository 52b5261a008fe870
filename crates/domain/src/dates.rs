// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Effective-date parsing for rate table files.
//!
//! Historical exports carry dates in several shapes: `1/1/2021`,
//! `01/01/2021 0:00`, `2021-01-01`, and spreadsheet exports such as
//! `1/1/2021 12:00:00 AM`. Monthly files carry no date column at all; the
//! effective date is embedded in the filename as an `MMDDYYYY` run.

use time::{Date, Month};

use crate::error::DomainError;

/// Parses an effective date from a rate file cell.
///
/// Any trailing time-of-day component is ignored. Accepted date shapes are
/// month-first with `/` or `-` separators, and year-first ISO-style with
/// `-` or `/` separators. Components need not be zero-padded.
///
/// # Errors
///
/// Returns [`DomainError::UnparseableDate`] when the value does not split
/// into three numeric components, and [`DomainError::InvalidCalendarDate`]
/// when the components do not name a real calendar day.
pub fn parse_effective_date(raw: &str) -> Result<Date, DomainError> {
    // "1/1/2021 0:00" and "1/1/2021 12:00:00 AM" both reduce to the first
    // whitespace-delimited token.
    let date_part: &str = raw.trim().split_whitespace().next().unwrap_or_default();
    if date_part.is_empty() {
        return Err(DomainError::UnparseableDate(raw.to_string()));
    }

    let separator: char = if date_part.contains('/') {
        '/'
    } else if date_part.contains('-') {
        '-'
    } else {
        return Err(DomainError::UnparseableDate(raw.to_string()));
    };

    let parts: Vec<&str> = date_part.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return Err(DomainError::UnparseableDate(raw.to_string()));
    };

    // A four-digit leading component means year-first; otherwise month-first.
    let (year_text, month_text, day_text) = if first.len() == 4 {
        (*first, *second, *third)
    } else {
        (*third, *first, *second)
    };

    let year: i32 = year_text
        .parse()
        .map_err(|_| DomainError::UnparseableDate(raw.to_string()))?;
    let month: u8 = month_text
        .parse()
        .map_err(|_| DomainError::UnparseableDate(raw.to_string()))?;
    let day: u8 = day_text
        .parse()
        .map_err(|_| DomainError::UnparseableDate(raw.to_string()))?;

    calendar_date(year, month, day).ok_or_else(|| DomainError::InvalidCalendarDate(raw.to_string()))
}

/// Extracts the effective date embedded in a monthly rate table filename.
///
/// The Department of Revenue names monthly files with an `MMDDYYYY` run,
/// for example `TPT_RATETABLE_ALL_01012026 (3).csv`. The first run of eight
/// consecutive digits is taken as the date.
///
/// # Errors
///
/// Returns [`DomainError::UnparseableFilename`] when no eight-digit run is
/// present, and [`DomainError::InvalidCalendarDate`] when the run does not
/// name a real calendar day.
pub fn effective_date_from_filename(filename: &str) -> Result<Date, DomainError> {
    let bytes: &[u8] = filename.as_bytes();
    let run: &str = bytes
        .windows(8)
        .position(|window| window.iter().all(u8::is_ascii_digit))
        .and_then(|start| filename.get(start..start + 8))
        .ok_or_else(|| DomainError::UnparseableFilename(filename.to_string()))?;

    let month: u8 = run[0..2]
        .parse()
        .map_err(|_| DomainError::UnparseableFilename(filename.to_string()))?;
    let day: u8 = run[2..4]
        .parse()
        .map_err(|_| DomainError::UnparseableFilename(filename.to_string()))?;
    let year: i32 = run[4..8]
        .parse()
        .map_err(|_| DomainError::UnparseableFilename(filename.to_string()))?;

    calendar_date(year, month, day)
        .ok_or_else(|| DomainError::InvalidCalendarDate(filename.to_string()))
}

fn calendar_date(year: i32, month: u8, day: u8) -> Option<Date> {
    let month: Month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}
