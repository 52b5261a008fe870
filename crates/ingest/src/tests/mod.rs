// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod parser_tests;
mod resolver_tests;

use std::collections::{HashMap, HashSet};

use az_tpt_domain::{BusinessClassCode, Jurisdiction, RateRecord, RateVersion};
use az_tpt_persistence::PersistenceError;
use time::Date;

use crate::store::RateStore;

/// In-memory fake store for pipeline unit tests.
///
/// Mirrors the real store's observable behavior: IDs assigned on insert,
/// placeholder descriptions never clobber real ones, and batch inserts
/// can be forced to fail from a given batch onward to exercise the
/// orchestrator's error tolerance.
pub struct MemoryStore {
    pub jurisdictions: Vec<Jurisdiction>,
    pub business_codes: HashMap<String, String>,
    pub versions: Vec<RateVersion>,
    pub rates: Vec<RateRecord>,
    pub load_jurisdiction_calls: usize,
    /// Fail batch inserts starting at this 0-based batch index.
    pub fail_batches_from: Option<usize>,
    batches_attempted: usize,
    next_jurisdiction_id: i64,
    next_version_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            jurisdictions: Vec::new(),
            business_codes: HashMap::new(),
            versions: Vec::new(),
            rates: Vec::new(),
            load_jurisdiction_calls: 0,
            fail_batches_from: None,
            batches_attempted: 0,
            next_jurisdiction_id: 1,
            next_version_id: 1,
        }
    }

    pub fn rates_for_version(&self, rate_version_id: i64) -> Vec<&RateRecord> {
        self.rates
            .iter()
            .filter(|record| record.rate_version_id == rate_version_id)
            .collect()
    }

    pub fn jurisdiction_by_code(&self, region_code: &str) -> Option<&Jurisdiction> {
        self.jurisdictions
            .iter()
            .find(|jurisdiction| jurisdiction.region_code() == region_code)
    }
}

impl RateStore for MemoryStore {
    fn load_jurisdictions(&mut self) -> Result<Vec<Jurisdiction>, PersistenceError> {
        self.load_jurisdiction_calls += 1;
        Ok(self.jurisdictions.clone())
    }

    fn insert_jurisdiction(
        &mut self,
        jurisdiction: &Jurisdiction,
    ) -> Result<i64, PersistenceError> {
        if self
            .jurisdiction_by_code(jurisdiction.region_code())
            .is_some()
        {
            return Err(PersistenceError::DatabaseError(format!(
                "UNIQUE constraint failed: jurisdictions.region_code ({})",
                jurisdiction.region_code()
            )));
        }
        let jurisdiction_id: i64 = self.next_jurisdiction_id;
        self.next_jurisdiction_id += 1;
        self.jurisdictions.push(Jurisdiction::with_id(
            jurisdiction_id,
            jurisdiction.region_code(),
            jurisdiction.name(),
            jurisdiction.level(),
            jurisdiction.county_region_code().map(String::from),
        ));
        Ok(jurisdiction_id)
    }

    fn upsert_business_code(&mut self, code: &BusinessClassCode) -> Result<(), PersistenceError> {
        self.business_codes
            .insert(code.code().to_string(), code.description().to_string());
        Ok(())
    }

    fn ensure_business_code(&mut self, code: &BusinessClassCode) -> Result<(), PersistenceError> {
        self.business_codes
            .entry(code.code().to_string())
            .or_insert_with(|| code.description().to_string());
        Ok(())
    }

    fn find_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<Option<RateVersion>, PersistenceError> {
        Ok(self
            .versions
            .iter()
            .find(|version| version.effective_date() == effective_date)
            .cloned())
    }

    fn create_rate_version(
        &mut self,
        effective_date: Date,
    ) -> Result<RateVersion, PersistenceError> {
        let version: RateVersion = RateVersion::with_id(self.next_version_id, effective_date);
        self.next_version_id += 1;
        self.versions.push(version.clone());
        Ok(version)
    }

    fn existing_rate_keys(
        &mut self,
        rate_version_id: i64,
    ) -> Result<HashSet<(i64, String)>, PersistenceError> {
        Ok(self
            .rates
            .iter()
            .filter(|record| record.rate_version_id == rate_version_id)
            .map(RateRecord::key)
            .collect())
    }

    fn insert_rates(&mut self, records: &[RateRecord]) -> Result<usize, PersistenceError> {
        let batch_index: usize = self.batches_attempted;
        self.batches_attempted += 1;
        if let Some(fail_from) = self.fail_batches_from {
            if batch_index >= fail_from {
                return Err(PersistenceError::DatabaseError(
                    "database is locked".to_string(),
                ));
            }
        }
        self.rates.extend_from_slice(records);
        Ok(records.len())
    }
}

pub fn create_test_date() -> Date {
    Date::from_calendar_date(2026, time::Month::January, 1).expect("Valid test date")
}

pub fn create_test_row(region_code: &str, business_code: &str, rate: f64) -> crate::RateRow {
    crate::RateRow {
        region_code: region_code.to_string(),
        region_name: String::new(),
        business_code: business_code.to_string(),
        business_name: String::new(),
        rate,
    }
}
