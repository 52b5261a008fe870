// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-path query modules.
//!
//! All queries use Diesel DSL against the `SQLite` connection. Row tuples
//! are converted to domain types at this boundary so callers never see
//! raw rows.
//!
//! ## Module Organization
//!
//! - `business_codes` — Business class code lookups
//! - `jurisdictions` — Jurisdiction loading for the resolver cache
//! - `rates` — Stored rates, dedupe keys, coverage
//! - `versions` — Rate version lookups and coverage summaries

pub mod business_codes;
pub mod jurisdictions;
pub mod rates;
pub mod versions;
