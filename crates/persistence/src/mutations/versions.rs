// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rate version mutations.

use az_tpt_domain::RateVersion;
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::data_models;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new rate version for an effective date and returns it with
/// its assigned ID. `loaded_at` records when the version row was created.
///
/// Callers must check for an existing version first; this function always
/// inserts. The get-or-create read-then-write lives in the ingest layer.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create(
    conn: &mut SqliteConnection,
    effective_date: time::Date,
) -> Result<RateVersion, PersistenceError> {
    let date_text: String = data_models::format_date(effective_date)?;
    let loaded_at: String = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(e.to_string()))?;

    diesel::insert_into(diesel_schema::rate_versions::table)
        .values((
            diesel_schema::rate_versions::effective_date.eq(&date_text),
            diesel_schema::rate_versions::loaded_at.eq(&loaded_at),
        ))
        .execute(conn)?;

    let rate_version_id: i64 = get_last_insert_rowid(conn)?;

    info!(
        rate_version_id,
        effective_date = %date_text,
        "Created rate version"
    );

    Ok(RateVersion::with_id(rate_version_id, effective_date))
}
