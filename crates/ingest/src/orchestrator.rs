// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-date ingestion.
//!
//! One run loads one set of parsed rows into one rate version:
//!
//! 1. Get or create the version for the effective date
//! 2. Load the jurisdiction cache and the version's existing rate keys
//! 3. Resolve, dedupe, and route each row
//! 4. Insert accepted rows in batches of [`BATCH_SIZE`]
//!
//! A failed batch is counted and logged but never aborts the run; the
//! remaining batches still load. Re-running the same file against the
//! same version is a no-op because every stored key is skipped.

use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use az_tpt_domain::{
    BusinessClassCode, DomainError, RateRecord, RateVersion, effective_date_from_filename,
};
use az_tpt_persistence::PersistenceError;
use serde::Serialize;
use time::Date;
use tracing::{info, warn};

use crate::error::IngestError;
use crate::parser::{RateRow, parse_monthly};
use crate::resolver::JurisdictionResolver;
use crate::store::RateStore;
use crate::versions::get_or_create_version;

/// Rows per insert statement.
pub const BATCH_SIZE: usize = 500;

/// Options controlling a single ingestion run.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Create jurisdictions for unseen region codes. When disabled,
    /// rows with unknown region codes are skipped and reported.
    pub create_missing_jurisdictions: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            create_missing_jurisdictions: true,
        }
    }
}

/// The outcome of one single-date ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub rate_version_id: i64,
    pub effective_date: String,
    /// Rows that parsed successfully and entered the pipeline.
    pub total_rows: usize,
    pub inserted: usize,
    pub skipped_existing: usize,
    pub skipped_missing_jurisdiction: usize,
    pub parse_errors: usize,
    /// Rows lost to failed insert batches.
    pub insert_errors: usize,
    /// Distinct region codes that could not be resolved.
    pub missing_region_codes: Vec<String>,
    pub elapsed_ms: u64,
}

/// Ingests parsed rows into the version for `effective_date`.
///
/// `parse_error_count` carries the rejected-row count from parsing so
/// the report reflects the whole file, not just the rows that reached
/// the pipeline.
///
/// # Errors
///
/// Returns an error if the store fails on anything other than a rate
/// batch insert. Batch insert failures are tolerated and counted.
pub fn ingest_rows<S: RateStore>(
    store: &mut S,
    effective_date: Date,
    rows: &[RateRow],
    parse_error_count: usize,
    options: IngestOptions,
) -> Result<RunReport, IngestError> {
    let started: Instant = Instant::now();

    let version: RateVersion = get_or_create_version(store, effective_date)?;
    let rate_version_id: i64 = version.rate_version_id().ok_or_else(|| {
        PersistenceError::Other("Rate version is missing its assigned ID".to_string())
    })?;

    let mut resolver: JurisdictionResolver =
        JurisdictionResolver::load(store, options.create_missing_jurisdictions)?;

    // Keys already stored for this version, extended with keys queued this
    // run so in-file duplicates are no-ops too.
    let mut seen_keys: HashSet<(i64, String)> = store.existing_rate_keys(rate_version_id)?;
    let mut described_codes: HashSet<String> = HashSet::new();
    let mut missing_codes: BTreeSet<String> = BTreeSet::new();

    let mut pending: Vec<RateRecord> = Vec::with_capacity(BATCH_SIZE);
    let mut batch_index: usize = 0;
    let mut inserted: usize = 0;
    let mut skipped_existing: usize = 0;
    let mut skipped_missing_jurisdiction: usize = 0;
    let mut insert_errors: usize = 0;

    for row in rows {
        // Business code bookkeeping happens once per distinct code.
        if described_codes.insert(row.business_code.clone()) {
            let code: BusinessClassCode =
                BusinessClassCode::new(&row.business_code, &row.business_name);
            if row.business_name.trim().is_empty() {
                store.ensure_business_code(&code)?;
            } else {
                store.upsert_business_code(&code)?;
            }
        }

        let Some(jurisdiction) = resolver.resolve(store, &row.region_code, &row.region_name)?
        else {
            skipped_missing_jurisdiction += 1;
            missing_codes.insert(row.region_code.clone());
            continue;
        };
        let jurisdiction_id: i64 = jurisdiction.jurisdiction_id().ok_or_else(|| {
            PersistenceError::Other("Resolved jurisdiction is missing its ID".to_string())
        })?;

        if !seen_keys.insert((jurisdiction_id, row.business_code.clone())) {
            skipped_existing += 1;
            continue;
        }

        pending.push(RateRecord::routed(
            rate_version_id,
            jurisdiction_id,
            &row.business_code,
            jurisdiction.level(),
            row.rate,
        ));
        if pending.len() == BATCH_SIZE {
            flush_batch(
                store,
                &mut pending,
                &mut batch_index,
                &mut inserted,
                &mut insert_errors,
            );
        }
    }
    flush_batch(
        store,
        &mut pending,
        &mut batch_index,
        &mut inserted,
        &mut insert_errors,
    );

    let report: RunReport = RunReport {
        rate_version_id,
        effective_date: effective_date.to_string(),
        total_rows: rows.len(),
        inserted,
        skipped_existing,
        skipped_missing_jurisdiction,
        parse_errors: parse_error_count,
        insert_errors,
        missing_region_codes: missing_codes.into_iter().collect(),
        elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        rate_version_id,
        effective_date = %report.effective_date,
        inserted = report.inserted,
        skipped_existing = report.skipped_existing,
        "Completed ingestion run"
    );

    Ok(report)
}

/// Ingests one monthly rate table file.
///
/// When `effective_date` is `None`, the date is derived from the
/// `MMDDYYYY` run in the filename.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the effective date
/// cannot be determined, or the store fails.
pub fn ingest_monthly_file<S: RateStore>(
    store: &mut S,
    path: &Path,
    effective_date: Option<Date>,
    options: IngestOptions,
) -> Result<RunReport, IngestError> {
    let effective_date: Date = match effective_date {
        Some(date) => date,
        None => {
            let filename: &str = path
                .file_name()
                .and_then(OsStr::to_str)
                .ok_or_else(|| DomainError::UnparseableFilename(path.display().to_string()))?;
            effective_date_from_filename(filename)?
        }
    };

    let file: File = File::open(path)?;
    let parsed = parse_monthly(BufReader::new(file))?;
    ingest_rows(
        store,
        effective_date,
        &parsed.rows,
        parsed.errors.len(),
        options,
    )
}

fn flush_batch<S: RateStore>(
    store: &mut S,
    pending: &mut Vec<RateRecord>,
    batch_index: &mut usize,
    inserted: &mut usize,
    insert_errors: &mut usize,
) {
    if pending.is_empty() {
        return;
    }
    match store.insert_rates(pending) {
        Ok(count) => *inserted += count,
        Err(error) => {
            warn!(
                batch_index = *batch_index,
                batch_size = pending.len(),
                %error,
                "Rate batch insert failed; continuing with remaining batches"
            );
            *insert_errors += pending.len();
        }
    }
    *batch_index += 1;
    pending.clear();
}
