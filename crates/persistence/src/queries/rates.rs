// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stored rate queries.
//!
//! The dedupe read here is the backbone of idempotent re-uploads: the
//! orchestrator fetches every (jurisdiction, business code) key already
//! present in a version in one query, then skips matching incoming rows
//! without further round-trips.

use std::collections::HashSet;

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{RateListing, RateListingRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Loads every (`jurisdiction_id`, `business_code`) key already stored
/// for a rate version.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn existing_keys(
    conn: &mut SqliteConnection,
    rate_version_id: i64,
) -> Result<HashSet<(i64, String)>, PersistenceError> {
    let keys: Vec<(i64, String)> = diesel_schema::rates::table
        .filter(diesel_schema::rates::rate_version_id.eq(rate_version_id))
        .select((
            diesel_schema::rates::jurisdiction_id,
            diesel_schema::rates::business_code,
        ))
        .load(conn)?;

    Ok(keys.into_iter().collect())
}

/// Lists rates for a version joined to their jurisdictions, optionally
/// filtered by region code, business code, and/or a minimum total rate.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_filtered(
    conn: &mut SqliteConnection,
    rate_version_id: i64,
    region_code: Option<&str>,
    business_code: Option<&str>,
    min_total_rate: Option<f64>,
) -> Result<Vec<RateListing>, PersistenceError> {
    let mut query = diesel_schema::rates::table
        .inner_join(diesel_schema::jurisdictions::table)
        .filter(diesel_schema::rates::rate_version_id.eq(rate_version_id))
        .into_boxed();

    if let Some(code) = region_code {
        query = query.filter(diesel_schema::jurisdictions::region_code.eq(code.to_string()));
    }
    if let Some(code) = business_code {
        query = query.filter(diesel_schema::rates::business_code.eq(code.to_string()));
    }
    if let Some(minimum) = min_total_rate {
        query = query.filter(diesel_schema::rates::total_rate.ge(minimum));
    }

    let rows: Vec<RateListingRow> = query
        .select((
            diesel_schema::jurisdictions::region_code,
            diesel_schema::jurisdictions::name,
            diesel_schema::jurisdictions::level,
            diesel_schema::rates::business_code,
            diesel_schema::rates::state_rate,
            diesel_schema::rates::county_rate,
            diesel_schema::rates::city_rate,
            diesel_schema::rates::total_rate,
        ))
        .order((
            diesel_schema::jurisdictions::region_code.asc(),
            diesel_schema::rates::business_code.asc(),
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                region_code,
                jurisdiction_name,
                level,
                business_code,
                state_rate,
                county_rate,
                city_rate,
                total_rate,
            )| RateListing {
                region_code,
                jurisdiction_name,
                level,
                business_code,
                state_rate,
                county_rate,
                city_rate,
                total_rate,
            },
        )
        .collect())
}

/// Returns the distinct county region codes that have at least one rate
/// row in a version.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn county_codes_present(
    conn: &mut SqliteConnection,
    rate_version_id: i64,
) -> Result<Vec<String>, PersistenceError> {
    Ok(diesel_schema::rates::table
        .inner_join(diesel_schema::jurisdictions::table)
        .filter(diesel_schema::rates::rate_version_id.eq(rate_version_id))
        .filter(diesel_schema::jurisdictions::level.eq("county"))
        .select(diesel_schema::jurisdictions::region_code)
        .distinct()
        .order(diesel_schema::jurisdictions::region_code.asc())
        .load(conn)?)
}
