// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Jurisdiction mutations.

use az_tpt_domain::Jurisdiction;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new jurisdiction and returns its assigned ID.
///
/// The region code is unique; inserting a duplicate fails with a database
/// error. The resolver guarantees it only inserts unseen codes.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert(
    conn: &mut SqliteConnection,
    jurisdiction: &Jurisdiction,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(diesel_schema::jurisdictions::table)
        .values((
            diesel_schema::jurisdictions::region_code.eq(jurisdiction.region_code()),
            diesel_schema::jurisdictions::name.eq(jurisdiction.name()),
            diesel_schema::jurisdictions::level.eq(jurisdiction.level().as_str()),
            diesel_schema::jurisdictions::county_region_code.eq(jurisdiction.county_region_code()),
        ))
        .execute(conn)?;

    let jurisdiction_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        jurisdiction_id,
        region_code = jurisdiction.region_code(),
        level = jurisdiction.level().as_str(),
        "Inserted jurisdiction"
    );

    Ok(jurisdiction_id)
}
