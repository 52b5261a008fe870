// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Jurisdiction resolution with a run-scoped cache.
//!
//! The resolver loads the full jurisdiction table once, then serves every
//! lookup from memory. Store round-trips during a run are proportional to
//! the number of distinct unseen region codes, not the number of rows.
//!
//! The level of an unseen region code is inferred from the fixed county
//! set: one of the fifteen Arizona county codes is a county, anything
//! else is a city. A jurisdiction's stored level is never changed by
//! later rows.

use std::collections::HashMap;

use az_tpt_domain::{Jurisdiction, JurisdictionLevel, county_name, is_county_code};
use az_tpt_persistence::PersistenceError;
use tracing::info;

use crate::store::RateStore;

pub struct JurisdictionResolver {
    cache: HashMap<String, Jurisdiction>,
    create_missing: bool,
}

impl JurisdictionResolver {
    /// Loads all known jurisdictions into the cache.
    ///
    /// With `create_missing` set, unseen region codes are created on
    /// first sight; otherwise they resolve to `None` and the caller
    /// skips the row.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn load<S: RateStore>(
        store: &mut S,
        create_missing: bool,
    ) -> Result<Self, PersistenceError> {
        let jurisdictions: Vec<Jurisdiction> = store.load_jurisdictions()?;
        info!(count = jurisdictions.len(), "Loaded jurisdiction cache");

        let cache: HashMap<String, Jurisdiction> = jurisdictions
            .into_iter()
            .map(|jurisdiction| (jurisdiction.region_code().to_string(), jurisdiction))
            .collect();

        Ok(Self {
            cache,
            create_missing,
        })
    }

    /// Resolves a region code to a persisted jurisdiction.
    ///
    /// Returns `None` when the code is unknown and creation is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn resolve<S: RateStore>(
        &mut self,
        store: &mut S,
        region_code: &str,
        region_name: &str,
    ) -> Result<Option<Jurisdiction>, PersistenceError> {
        if let Some(jurisdiction) = self.cache.get(region_code) {
            return Ok(Some(jurisdiction.clone()));
        }
        if !self.create_missing {
            return Ok(None);
        }

        let jurisdiction: Jurisdiction = Self::build(region_code, region_name);
        let jurisdiction_id: i64 = store.insert_jurisdiction(&jurisdiction)?;
        let persisted: Jurisdiction = Jurisdiction::with_id(
            jurisdiction_id,
            jurisdiction.region_code(),
            jurisdiction.name(),
            jurisdiction.level(),
            jurisdiction.county_region_code().map(String::from),
        );

        info!(
            jurisdiction_id,
            region_code,
            level = persisted.level().as_str(),
            "Created jurisdiction"
        );
        self.cache
            .insert(region_code.to_string(), persisted.clone());
        Ok(Some(persisted))
    }

    /// Returns how many jurisdictions the cache currently holds.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn build(region_code: &str, region_name: &str) -> Jurisdiction {
        if is_county_code(region_code) {
            // Prefer the canonical county name over whatever the file says.
            let name: &str = county_name(region_code).unwrap_or(region_name);
            Jurisdiction::new(region_code, name, JurisdictionLevel::County)
        } else {
            Jurisdiction::new(region_code, region_name, JurisdictionLevel::City)
        }
    }
}
