// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Arizona TPT rate pipeline.
//!
//! This crate provides `SQLite` persistence for jurisdictions, business
//! class codes, rate versions, and rate rows. It is built on Diesel with
//! embedded migrations.
//!
//! ## Testing
//!
//! Tests run against shared in-memory `SQLite` databases. Each test
//! receives a unique database instance via an atomic counter, ensuring
//! deterministic isolation without time-based collisions.

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

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use az_tpt_domain::{BusinessClassCode, COUNTY_CODES, Jurisdiction, RateRecord, RateVersion};
use diesel::SqliteConnection;
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{CountyCoverage, RateListing, VersionCoverage};
pub use error::PersistenceError;

/// Persistence adapter for the rate pipeline's `SQLite` database.
///
/// All reads and writes go through this adapter; callers never see the
/// underlying connection or raw rows.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Uses a shared in-memory database via Diesel. Each call receives a
    /// unique database instance via atomic counter, ensuring deterministic
    /// test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode gives better read concurrency for file-based databases.
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Jurisdictions
    // ========================================================================

    /// Loads every jurisdiction, ordered by region code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_jurisdictions(&mut self) -> Result<Vec<Jurisdiction>, PersistenceError> {
        queries::jurisdictions::load_all(&mut self.conn)
    }

    /// Inserts a new jurisdiction and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the region
    /// code is already present.
    pub fn insert_jurisdiction(
        &mut self,
        jurisdiction: &Jurisdiction,
    ) -> Result<i64, PersistenceError> {
        mutations::jurisdictions::insert(&mut self.conn, jurisdiction)
    }

    // ========================================================================
    // Business Class Codes
    // ========================================================================

    /// Loads every business class code, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_business_codes(&mut self) -> Result<Vec<BusinessClassCode>, PersistenceError> {
        queries::business_codes::load_all(&mut self.conn)
    }

    /// Upserts a business class code, replacing any stored description.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn upsert_business_code(
        &mut self,
        code: &BusinessClassCode,
    ) -> Result<(), PersistenceError> {
        mutations::business_codes::upsert(&mut self.conn, code)
    }

    /// Inserts a business class code only if it is not already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn ensure_business_code(
        &mut self,
        code: &BusinessClassCode,
    ) -> Result<(), PersistenceError> {
        mutations::business_codes::insert_if_missing(&mut self.conn, code)
    }

    // ========================================================================
    // Rate Versions
    // ========================================================================

    /// Finds the rate version for an effective date, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<Option<RateVersion>, PersistenceError> {
        queries::versions::find_by_effective_date(&mut self.conn, effective_date)
    }

    /// Finds a rate version by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::VersionNotFound`] if no such version exists.
    pub fn get_rate_version(
        &mut self,
        rate_version_id: i64,
    ) -> Result<RateVersion, PersistenceError> {
        queries::versions::find_by_id(&mut self.conn, rate_version_id)
    }

    /// Creates a new rate version for an effective date.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<RateVersion, PersistenceError> {
        mutations::versions::create(&mut self.conn, effective_date)
    }

    /// Lists every rate version with its rate and jurisdiction counts,
    /// ordered by effective date ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_version_coverage(&mut self) -> Result<Vec<VersionCoverage>, PersistenceError> {
        queries::versions::list_with_coverage(&mut self.conn)
    }

    // ========================================================================
    // Rates
    // ========================================================================

    /// Loads every (`jurisdiction_id`, `business_code`) key already stored
    /// for a rate version.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn existing_rate_keys(
        &mut self,
        rate_version_id: i64,
    ) -> Result<HashSet<(i64, String)>, PersistenceError> {
        queries::rates::existing_keys(&mut self.conn, rate_version_id)
    }

    /// Inserts a batch of rate records in a single statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_rates(&mut self, records: &[RateRecord]) -> Result<usize, PersistenceError> {
        mutations::rates::insert_batch(&mut self.conn, records)
    }

    /// Lists rates for a version joined to their jurisdictions, optionally
    /// filtered by region code, business code, and/or a minimum total rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rates(
        &mut self,
        rate_version_id: i64,
        region_code: Option<&str>,
        business_code: Option<&str>,
        min_total_rate: Option<f64>,
    ) -> Result<Vec<RateListing>, PersistenceError> {
        queries::rates::list_filtered(
            &mut self.conn,
            rate_version_id,
            region_code,
            business_code,
            min_total_rate,
        )
    }

    /// Reports which of the fifteen Arizona counties have rate rows in a
    /// version and which are missing.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::VersionNotFound`] if the version does
    /// not exist, or an error if the query fails.
    pub fn county_coverage(
        &mut self,
        rate_version_id: i64,
    ) -> Result<CountyCoverage, PersistenceError> {
        // Distinguish "empty version" from "no such version".
        queries::versions::find_by_id(&mut self.conn, rate_version_id)?;

        let present: Vec<String> =
            queries::rates::county_codes_present(&mut self.conn, rate_version_id)?;
        let present_set: HashSet<&str> = present.iter().map(String::as_str).collect();
        let missing: Vec<String> = COUNTY_CODES
            .iter()
            .filter(|(code, _)| !present_set.contains(code))
            .map(|(code, _)| (*code).to_string())
            .collect();

        Ok(CountyCoverage {
            rate_version_id,
            present,
            missing,
        })
    }
}
