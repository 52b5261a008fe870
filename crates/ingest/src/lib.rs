// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV ingestion pipeline for Arizona TPT rate tables.
//!
//! This crate turns Department of Revenue rate table CSV files into
//! versioned rate rows:
//!
//! - `parser` — CSV parsing with header validation and per-row error
//!   classification
//! - `store` — the persistence seam the pipeline writes through
//! - `resolver` — jurisdiction resolution with a run-scoped cache
//! - `versions` — get-or-create rate version management
//! - `orchestrator` — single-date ingestion: dedupe, routing, batching
//! - `historical` — multi-date files grouped into one run per date

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod historical;
mod orchestrator;
mod parser;
mod resolver;
mod store;
mod versions;

#[cfg(test)]
mod tests;

pub use error::IngestError;
pub use historical::{IngestSummary, ingest_historical};
pub use orchestrator::{BATCH_SIZE, IngestOptions, RunReport, ingest_monthly_file, ingest_rows};
pub use parser::{
    HistoricalRateRow, ParsedFile, RateRow, RowError, RowErrorKind, parse_historical,
    parse_monthly,
};
pub use resolver::JurisdictionResolver;
pub use store::RateStore;
pub use versions::get_or_create_version;
