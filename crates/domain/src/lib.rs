// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rate rules for the Arizona TPT rate pipeline.
//!
//! This crate is pure: no I/O, no database, no CSV handling. It defines
//! jurisdiction identity and level, business class codes, rate versions,
//! routed rate records, the rate normalization rule, ADOR date parsing,
//! and the static Arizona county reference set.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod counties;
mod dates;
mod error;
mod rate;
mod types;

pub use counties::{COUNTY_CODES, county_name, is_county_code};
pub use dates::{effective_date_from_filename, parse_effective_date};
pub use error::DomainError;
pub use rate::normalize_rate;
pub use types::{BusinessClassCode, Jurisdiction, JurisdictionLevel, RateRecord, RateVersion};
