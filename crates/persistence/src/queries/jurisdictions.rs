// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Jurisdiction queries.
//!
//! The resolver loads the entire jurisdiction table once per run and
//! serves all lookups from memory, so the only read here is a full scan.

use diesel::prelude::*;
use diesel::SqliteConnection;
use az_tpt_domain::{Jurisdiction, JurisdictionLevel};

use crate::data_models::JurisdictionRow;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Loads every jurisdiction, ordered by region code.
///
/// # Errors
///
/// Returns an error if the query fails or a stored level string is not
/// `county` or `city`.
pub fn load_all(conn: &mut SqliteConnection) -> Result<Vec<Jurisdiction>, PersistenceError> {
    let rows: Vec<JurisdictionRow> = diesel_schema::jurisdictions::table
        .select((
            diesel_schema::jurisdictions::jurisdiction_id,
            diesel_schema::jurisdictions::region_code,
            diesel_schema::jurisdictions::name,
            diesel_schema::jurisdictions::level,
            diesel_schema::jurisdictions::county_region_code,
        ))
        .order(diesel_schema::jurisdictions::region_code.asc())
        .load(conn)?;

    rows.into_iter().map(row_to_jurisdiction).collect()
}

fn row_to_jurisdiction(row: JurisdictionRow) -> Result<Jurisdiction, PersistenceError> {
    let (jurisdiction_id, region_code, name, level, county_region_code) = row;
    let level: JurisdictionLevel = level
        .parse()
        .map_err(|e: az_tpt_domain::DomainError| PersistenceError::CorruptRow(e.to_string()))?;
    Ok(Jurisdiction::with_id(
        jurisdiction_id,
        &region_code,
        &name,
        level,
        county_region_code,
    ))
}
