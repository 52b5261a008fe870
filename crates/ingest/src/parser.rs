// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV parsing for rate table files.
//!
//! Monthly files carry `RegionCode`, `RegionName`, `BusinessCode`,
//! `BusinessCodesName`, and `TaxRate` columns; historical files add
//! `RateStartDate`. Excel exports prepend a UTF-8 BOM to the first
//! header, so header names are normalized before matching.
//!
//! A missing required column is fatal. Everything else is a per-row
//! problem: the row is recorded as a [`RowError`] and parsing continues.

use std::collections::HashMap;
use std::io::Read;

use az_tpt_domain::{normalize_rate, parse_effective_date};
use thiserror::Error;
use time::Date;
use tracing::warn;

use crate::error::IngestError;

const MONTHLY_HEADERS: [&str; 5] = [
    "RegionCode",
    "RegionName",
    "BusinessCode",
    "BusinessCodesName",
    "TaxRate",
];

const HISTORICAL_HEADERS: [&str; 6] = [
    "RegionCode",
    "RegionName",
    "BusinessCode",
    "BusinessCodesName",
    "TaxRate",
    "RateStartDate",
];

/// One parsed rate row from a monthly file.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub region_code: String,
    pub region_name: String,
    pub business_code: String,
    pub business_name: String,
    /// Normalized fractional rate (e.g. `0.063`).
    pub rate: f64,
}

/// One parsed rate row from a historical file, tagged with the date the
/// rate took effect.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRateRow {
    pub row: RateRow,
    pub start_date: Date,
}

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowErrorKind {
    #[error("Malformed CSV record: {0}")]
    MalformedRecord(String),
    #[error("Missing region code")]
    MissingRegionCode,
    #[error("Missing business code")]
    MissingBusinessCode,
    #[error("Unparseable rate: '{0}'")]
    UnparseableRate(String),
    #[error("Unparseable rate start date: '{0}'")]
    UnparseableDate(String),
}

/// A rejected row: its 1-based line number (the header is line 1) and
/// the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub kind: RowErrorKind,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.kind)
    }
}

/// The outcome of parsing one file: accepted rows plus rejected rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile<T> {
    pub rows: Vec<T>,
    pub errors: Vec<RowError>,
}

/// Parses a monthly rate table file.
///
/// # Errors
///
/// Returns an error if the header record cannot be read or a required
/// column is missing. Malformed data records are per-row errors.
pub fn parse_monthly<R: Read>(reader: R) -> Result<ParsedFile<RateRow>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns: HashMap<String, usize> = read_header_columns(&mut csv_reader)?;
    require_columns(&columns, &MONTHLY_HEADERS)?;

    let mut rows: Vec<RateRow> = Vec::new();
    let mut errors: Vec<RowError> = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let line: usize = index + 2;
        let record: csv::StringRecord = match record {
            Ok(record) => record,
            Err(error) => {
                errors.push(RowError {
                    row: line,
                    kind: RowErrorKind::MalformedRecord(error.to_string()),
                });
                continue;
            }
        };
        match parse_rate_fields(&record, &columns, line) {
            Ok(row) => rows.push(row),
            Err(error) => errors.push(error),
        }
    }

    Ok(ParsedFile { rows, errors })
}

/// Parses a historical rate table file carrying `RateStartDate`.
///
/// # Errors
///
/// Returns an error if the header record cannot be read or a required
/// column is missing. Malformed data records are per-row errors.
pub fn parse_historical<R: Read>(reader: R) -> Result<ParsedFile<HistoricalRateRow>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns: HashMap<String, usize> = read_header_columns(&mut csv_reader)?;
    require_columns(&columns, &HISTORICAL_HEADERS)?;

    let mut rows: Vec<HistoricalRateRow> = Vec::new();
    let mut errors: Vec<RowError> = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let line: usize = index + 2;
        let record: csv::StringRecord = match record {
            Ok(record) => record,
            Err(error) => {
                errors.push(RowError {
                    row: line,
                    kind: RowErrorKind::MalformedRecord(error.to_string()),
                });
                continue;
            }
        };

        let row: RateRow = match parse_rate_fields(&record, &columns, line) {
            Ok(row) => row,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };

        let date_text: &str = field(&record, &columns, "RateStartDate");
        match parse_effective_date(date_text) {
            Ok(start_date) => rows.push(HistoricalRateRow { row, start_date }),
            Err(_) => {
                warn!(line, date = date_text, "Skipping row with unparseable start date");
                errors.push(RowError {
                    row: line,
                    kind: RowErrorKind::UnparseableDate(date_text.to_string()),
                });
            }
        }
    }

    Ok(ParsedFile { rows, errors })
}

/// Reads the header record and maps normalized column names to positions.
///
/// Normalization strips the UTF-8 BOM Excel prepends to the first header
/// and trims surrounding whitespace.
fn read_header_columns<R: Read>(
    csv_reader: &mut csv::Reader<R>,
) -> Result<HashMap<String, usize>, IngestError> {
    let headers: &csv::StringRecord = csv_reader.headers()?;
    Ok(headers
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let name: &str = name.trim_start_matches('\u{feff}').trim();
            (name.to_string(), index)
        })
        .collect())
}

fn require_columns(
    columns: &HashMap<String, usize>,
    required: &[&str],
) -> Result<(), IngestError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !columns.contains_key(**name))
        .map(|name| (*name).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingHeaders(missing))
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> &'a str {
    columns
        .get(name)
        .and_then(|index| record.get(*index))
        .unwrap_or("")
        .trim()
}

fn parse_rate_fields(
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
    line: usize,
) -> Result<RateRow, RowError> {
    let region_code: &str = field(record, columns, "RegionCode");
    if region_code.is_empty() {
        return Err(RowError {
            row: line,
            kind: RowErrorKind::MissingRegionCode,
        });
    }

    let business_code: &str = field(record, columns, "BusinessCode");
    if business_code.is_empty() {
        return Err(RowError {
            row: line,
            kind: RowErrorKind::MissingBusinessCode,
        });
    }

    // An empty or non-numeric rate rejects the row. normalize_rate's
    // 0.0-on-junk fallback stays for direct callers, but a file row with
    // no usable rate is a parse error, not a real 0% rate.
    let rate_token: &str = field(record, columns, "TaxRate");
    if rate_token.replace('%', "").trim().parse::<f64>().is_err() {
        return Err(RowError {
            row: line,
            kind: RowErrorKind::UnparseableRate(rate_token.to_string()),
        });
    }

    Ok(RateRow {
        region_code: region_code.to_string(),
        region_name: field(record, columns, "RegionName").to_string(),
        business_code: business_code.to_string(),
        business_name: field(record, columns, "BusinessCodesName").to_string(),
        rate: normalize_rate(rate_token),
    })
}
