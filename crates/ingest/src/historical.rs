// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-date historical ingestion.
//!
//! Historical files carry rates for many effective dates at once. The
//! rows are grouped by start date and loaded as one single-date run per
//! date, in ascending date order. Two filters apply before grouping:
//!
//! - rows dated after `as_of` are dropped (rates that have not taken
//!   effect yet would pollute the history)
//! - zero-rate rows are dropped (historical county files use 0 to mean
//!   "no rate on file", not an actual zero rate)

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;
use tracing::info;

use crate::error::IngestError;
use crate::orchestrator::{IngestOptions, RunReport, ingest_rows};
use crate::parser::{HistoricalRateRow, ParsedFile, RateRow};
use crate::store::RateStore;

/// The outcome of a historical ingestion: one run per effective date,
/// in ascending date order.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub runs: Vec<RunReport>,
    /// Rows parsed from the file, before filtering.
    pub total_rows: usize,
    pub parse_errors: usize,
    pub skipped_future_rows: usize,
    pub dropped_zero_rates: usize,
}

/// Ingests a parsed historical file, one run per effective date.
///
/// `as_of` is the cutoff for the future-date filter, normally today.
///
/// # Errors
///
/// Returns an error if any single-date run fails fatally. Runs already
/// completed stay loaded; historical ingestion is restartable because
/// each run is idempotent.
pub fn ingest_historical<S: RateStore>(
    store: &mut S,
    parsed: &ParsedFile<HistoricalRateRow>,
    as_of: Date,
) -> Result<IngestSummary, IngestError> {
    let mut groups: BTreeMap<Date, Vec<RateRow>> = BTreeMap::new();
    let mut skipped_future_rows: usize = 0;
    let mut dropped_zero_rates: usize = 0;

    for historical_row in &parsed.rows {
        if historical_row.start_date > as_of {
            skipped_future_rows += 1;
            continue;
        }
        if historical_row.row.rate.abs() < f64::EPSILON {
            dropped_zero_rates += 1;
            continue;
        }
        groups
            .entry(historical_row.start_date)
            .or_default()
            .push(historical_row.row.clone());
    }

    info!(
        dates = groups.len(),
        skipped_future_rows, dropped_zero_rates, "Grouped historical rows by start date"
    );

    let options: IngestOptions = IngestOptions {
        create_missing_jurisdictions: true,
    };
    let mut runs: Vec<RunReport> = Vec::with_capacity(groups.len());
    for (effective_date, rows) in groups {
        let report: RunReport = ingest_rows(store, effective_date, &rows, 0, options)?;
        runs.push(report);
    }

    Ok(IngestSummary {
        runs,
        total_rows: parsed.rows.len(),
        parse_errors: parsed.errors.len(),
        skipped_future_rows,
        dropped_zero_rates,
    })
}
