// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batched rate inserts.

use az_tpt_domain::RateRecord;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NewRateRow;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts a batch of rate records in a single statement.
///
/// The `total_rate` column is derived from the record at insert time so
/// reads never have to recompute it.
///
/// # Returns
///
/// The number of rows inserted.
///
/// # Errors
///
/// Returns an error if the insert fails. The batch is all-or-nothing;
/// the orchestrator decides whether a failed batch aborts the run.
pub fn insert_batch(
    conn: &mut SqliteConnection,
    records: &[RateRecord],
) -> Result<usize, PersistenceError> {
    if records.is_empty() {
        return Ok(0);
    }

    let rows: Vec<NewRateRow> = records
        .iter()
        .map(|record| NewRateRow {
            rate_version_id: record.rate_version_id,
            jurisdiction_id: record.jurisdiction_id,
            business_code: record.business_code.clone(),
            state_rate: record.state_rate,
            county_rate: record.county_rate,
            city_rate: record.city_rate,
            total_rate: record.total_rate(),
        })
        .collect();

    let inserted: usize = diesel::insert_into(diesel_schema::rates::table)
        .values(&rows)
        .execute(conn)?;

    debug!(inserted, "Inserted rate batch");
    Ok(inserted)
}
