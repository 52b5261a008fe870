// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence seam the pipeline writes through.
//!
//! The orchestrator, resolver, and version manager are generic over this
//! trait so unit tests can run against an in-memory fake instead of a
//! real database.

use std::collections::HashSet;

use az_tpt_domain::{BusinessClassCode, Jurisdiction, RateRecord, RateVersion};
use az_tpt_persistence::{Persistence, PersistenceError};
use time::Date;

/// Storage operations the ingestion pipeline needs.
pub trait RateStore {
    /// Loads every known jurisdiction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn load_jurisdictions(&mut self) -> Result<Vec<Jurisdiction>, PersistenceError>;

    /// Inserts a new jurisdiction and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_jurisdiction(&mut self, jurisdiction: &Jurisdiction)
    -> Result<i64, PersistenceError>;

    /// Upserts a business class code, replacing any stored description.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn upsert_business_code(&mut self, code: &BusinessClassCode)
    -> Result<(), PersistenceError>;

    /// Inserts a business class code only if it is not already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn ensure_business_code(&mut self, code: &BusinessClassCode)
    -> Result<(), PersistenceError>;

    /// Finds the rate version for an effective date, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn find_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<Option<RateVersion>, PersistenceError>;

    /// Creates a new rate version for an effective date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn create_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<RateVersion, PersistenceError>;

    /// Loads every (`jurisdiction_id`, `business_code`) key already stored
    /// for a rate version.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn existing_rate_keys(
        &mut self,
        rate_version_id: i64,
    ) -> Result<HashSet<(i64, String)>, PersistenceError>;

    /// Inserts a batch of rate records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_rates(&mut self, records: &[RateRecord]) -> Result<usize, PersistenceError>;
}

impl RateStore for Persistence {
    fn load_jurisdictions(&mut self) -> Result<Vec<Jurisdiction>, PersistenceError> {
        Self::load_jurisdictions(self)
    }

    fn insert_jurisdiction(
        &mut self,
        jurisdiction: &Jurisdiction,
    ) -> Result<i64, PersistenceError> {
        Self::insert_jurisdiction(self, jurisdiction)
    }

    fn upsert_business_code(&mut self, code: &BusinessClassCode) -> Result<(), PersistenceError> {
        Self::upsert_business_code(self, code)
    }

    fn ensure_business_code(&mut self, code: &BusinessClassCode) -> Result<(), PersistenceError> {
        Self::ensure_business_code(self, code)
    }

    fn find_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<Option<RateVersion>, PersistenceError> {
        Self::find_rate_version(self, effective_date)
    }

    fn create_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<RateVersion, PersistenceError> {
        Self::create_rate_version(self, effective_date)
    }

    fn existing_rate_keys(
        &mut self,
        rate_version_id: i64,
    ) -> Result<HashSet<(i64, String)>, PersistenceError> {
        Self::existing_rate_keys(self, rate_version_id)
    }

    fn insert_rates(&mut self, records: &[RateRecord]) -> Result<usize, PersistenceError> {
        Self::insert_rates(self, records)
    }
}
