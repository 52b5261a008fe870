// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod business_code_tests;
mod rate_tests;

use az_tpt_domain::{BusinessClassCode, Jurisdiction, JurisdictionLevel};
use time::Date;

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database should initialize")
}

pub fn create_test_date() -> Date {
    Date::from_calendar_date(2026, time::Month::January, 1).expect("Valid test date")
}

pub fn create_test_county() -> Jurisdiction {
    Jurisdiction::new("MAR", "Maricopa", JurisdictionLevel::County)
}

pub fn create_test_city() -> Jurisdiction {
    Jurisdiction::new("PX", "Phoenix", JurisdictionLevel::City)
}

pub fn create_test_business_code() -> BusinessClassCode {
    BusinessClassCode::new("011", "Restaurants and Bars")
}

/// Seeds a jurisdiction, business code, and version; returns the
/// jurisdiction ID and version ID ready for rate inserts.
pub fn seed_rate_prerequisites(persistence: &mut Persistence) -> (i64, i64) {
    let jurisdiction_id: i64 = persistence
        .insert_jurisdiction(&create_test_county())
        .expect("Jurisdiction insert should succeed");
    persistence
        .upsert_business_code(&create_test_business_code())
        .expect("Business code upsert should succeed");
    let version = persistence
        .create_rate_version(create_test_date())
        .expect("Version creation should succeed");
    let version_id: i64 = version
        .rate_version_id()
        .expect("Created version should carry an ID");
    (jurisdiction_id, version_id)
}
