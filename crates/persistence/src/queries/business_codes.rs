// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business class code queries.

use az_tpt_domain::BusinessClassCode;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Loads every business class code, ordered by code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_all(conn: &mut SqliteConnection) -> Result<Vec<BusinessClassCode>, PersistenceError> {
    let rows: Vec<(String, String)> = diesel_schema::business_class_codes::table
        .select((
            diesel_schema::business_class_codes::code,
            diesel_schema::business_class_codes::description,
        ))
        .order(diesel_schema::business_class_codes::code.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(code, description)| BusinessClassCode::new(&code, &description))
        .collect())
}
