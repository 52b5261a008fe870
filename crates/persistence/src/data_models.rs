// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::PersistenceError;

/// Stored date format. Dates live in `SQLite` as ISO `YYYY-MM-DD` text.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a domain date for storage.
pub(crate) fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

/// Parses a stored date column back into a domain date.
pub(crate) fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(format!("Invalid stored date '{text}': {e}")))
}

/// Insertable row for the `rates` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::rates)]
pub struct NewRateRow {
    pub rate_version_id: i64,
    pub jurisdiction_id: i64,
    pub business_code: String,
    pub state_rate: f64,
    pub county_rate: f64,
    pub city_rate: f64,
    pub total_rate: f64,
}

/// Row data for a jurisdiction: id, region code, name, level, county region code.
pub type JurisdictionRow = (i64, String, String, String, Option<String>);

/// Row data for a stored rate joined to its jurisdiction.
pub type RateListingRow = (String, String, String, String, f64, f64, f64, f64);

/// Coverage summary for one rate version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionCoverage {
    pub rate_version_id: i64,
    pub effective_date: String,
    pub loaded_at: String,
    pub rate_count: i64,
    pub jurisdiction_count: i64,
}

/// One stored rate as exposed by the read API, joined to its jurisdiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateListing {
    pub region_code: String,
    pub jurisdiction_name: String,
    pub level: String,
    pub business_code: String,
    pub state_rate: f64,
    pub county_rate: f64,
    pub city_rate: f64,
    pub total_rate: f64,
}

/// County presence report for one rate version.
///
/// A version that loaded cleanly covers all fifteen Arizona counties;
/// `missing` names any county region codes with no rate rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountyCoverage {
    pub rate_version_id: i64,
    pub present: Vec<String>,
    pub missing: Vec<String>,
}
