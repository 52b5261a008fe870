// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rate version queries.

use az_tpt_domain::RateVersion;
use diesel::SqliteConnection;
use diesel::dsl::{count_distinct, count_star};
use diesel::prelude::*;
use time::Date;

use crate::data_models::{self, VersionCoverage};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Finds the rate version for an effective date, if one exists.
///
/// Effective dates are unique per version by construction; if duplicates
/// were ever introduced by hand, the lowest-ID version wins.
///
/// # Errors
///
/// Returns an error if the query fails or the stored date text is corrupt.
pub fn find_by_effective_date(
    conn: &mut SqliteConnection,
    effective_date: Date,
) -> Result<Option<RateVersion>, PersistenceError> {
    let date_text: String = data_models::format_date(effective_date)?;

    let row: Option<(i64, String)> = diesel_schema::rate_versions::table
        .filter(diesel_schema::rate_versions::effective_date.eq(&date_text))
        .select((
            diesel_schema::rate_versions::rate_version_id,
            diesel_schema::rate_versions::effective_date,
        ))
        .order(diesel_schema::rate_versions::rate_version_id.asc())
        .first(conn)
        .optional()?;

    match row {
        Some((rate_version_id, stored_date)) => {
            let date: Date = data_models::parse_date(&stored_date)?;
            Ok(Some(RateVersion::with_id(rate_version_id, date)))
        }
        None => Ok(None),
    }
}

/// Finds a rate version by its ID.
///
/// # Errors
///
/// Returns [`PersistenceError::VersionNotFound`] if no such version exists.
pub fn find_by_id(
    conn: &mut SqliteConnection,
    rate_version_id: i64,
) -> Result<RateVersion, PersistenceError> {
    let row: Option<(i64, String)> = diesel_schema::rate_versions::table
        .filter(diesel_schema::rate_versions::rate_version_id.eq(rate_version_id))
        .select((
            diesel_schema::rate_versions::rate_version_id,
            diesel_schema::rate_versions::effective_date,
        ))
        .first(conn)
        .optional()?;

    let (id, stored_date) = row.ok_or(PersistenceError::VersionNotFound(rate_version_id))?;
    let date: Date = data_models::parse_date(&stored_date)?;
    Ok(RateVersion::with_id(id, date))
}

/// Lists every rate version with its rate and jurisdiction counts,
/// ordered by effective date ascending.
///
/// # Errors
///
/// Returns an error if any query fails.
pub fn list_with_coverage(
    conn: &mut SqliteConnection,
) -> Result<Vec<VersionCoverage>, PersistenceError> {
    let versions: Vec<(i64, String, String)> = diesel_schema::rate_versions::table
        .select((
            diesel_schema::rate_versions::rate_version_id,
            diesel_schema::rate_versions::effective_date,
            diesel_schema::rate_versions::loaded_at,
        ))
        .order(diesel_schema::rate_versions::effective_date.asc())
        .load(conn)?;

    let mut coverage: Vec<VersionCoverage> = Vec::with_capacity(versions.len());
    for (rate_version_id, effective_date, loaded_at) in versions {
        let rate_count: i64 = diesel_schema::rates::table
            .filter(diesel_schema::rates::rate_version_id.eq(rate_version_id))
            .select(count_star())
            .first(conn)?;

        let jurisdiction_count: i64 = diesel_schema::rates::table
            .filter(diesel_schema::rates::rate_version_id.eq(rate_version_id))
            .select(count_distinct(diesel_schema::rates::jurisdiction_id))
            .first(conn)?;

        coverage.push(VersionCoverage {
            rate_version_id,
            effective_date,
            loaded_at,
            rate_count,
            jurisdiction_count,
        });
    }

    Ok(coverage)
}
