// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use az_tpt_domain::DomainError;
use az_tpt_persistence::PersistenceError;
use thiserror::Error;

/// Fatal ingestion errors.
///
/// These abort a run entirely. Recoverable per-row problems are reported
/// as [`crate::RowError`] values and never stop the pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file could not be read.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV structure itself is malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// One or more required header columns are missing.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    /// The effective date could not be determined.
    #[error("{0}")]
    Date(#[from] DomainError),

    /// The backing store failed.
    #[error("Store error: {0}")]
    Store(#[from] PersistenceError),
}
