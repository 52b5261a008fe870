// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-path mutation modules.
//!
//! Mutations use Diesel DSL throughout, with the single `SQLite`-specific
//! helper `last_insert_rowid()` imported from the `sqlite` module for
//! retrieving freshly assigned IDs.
//!
//! ## Module Organization
//!
//! - `business_codes` — Business class code upserts
//! - `jurisdictions` — Jurisdiction inserts
//! - `rates` — Batched rate inserts
//! - `versions` — Rate version creation

pub mod business_codes;
pub mod jurisdictions;
pub mod rates;
pub mod versions;
