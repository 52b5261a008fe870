// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business class code mutations.
//!
//! Codes are created lazily on first sight. A row with a real description
//! refreshes any placeholder stored earlier; a row without one never
//! clobbers a real description already on file.

use az_tpt_domain::BusinessClassCode;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Upserts a business class code, replacing the stored description.
///
/// Use this when the source row carries a real description.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert(
    conn: &mut SqliteConnection,
    code: &BusinessClassCode,
) -> Result<(), PersistenceError> {
    diesel::insert_into(diesel_schema::business_class_codes::table)
        .values((
            diesel_schema::business_class_codes::code.eq(code.code()),
            diesel_schema::business_class_codes::description.eq(code.description()),
        ))
        .on_conflict(diesel_schema::business_class_codes::code)
        .do_update()
        .set(diesel_schema::business_class_codes::description.eq(code.description()))
        .execute(conn)?;

    debug!(code = code.code(), "Upserted business class code");
    Ok(())
}

/// Inserts a business class code only if it is not already stored.
///
/// Use this when the source row has no description, so the placeholder
/// description never overwrites a real one.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_if_missing(
    conn: &mut SqliteConnection,
    code: &BusinessClassCode,
) -> Result<(), PersistenceError> {
    diesel::insert_into(diesel_schema::business_class_codes::table)
        .values((
            diesel_schema::business_class_codes::code.eq(code.code()),
            diesel_schema::business_class_codes::description.eq(code.description()),
        ))
        .on_conflict(diesel_schema::business_class_codes::code)
        .do_nothing()
        .execute(conn)?;

    Ok(())
}
