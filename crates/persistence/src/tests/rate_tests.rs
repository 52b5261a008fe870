// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use az_tpt_domain::{BusinessClassCode, Jurisdiction, JurisdictionLevel, RateRecord};

use super::{create_test_persistence, seed_rate_prerequisites};
use crate::{Persistence, PersistenceError};

#[test]
fn batch_insert_stores_all_rows() {
    let mut persistence: Persistence = create_test_persistence();
    let (jurisdiction_id, version_id) = seed_rate_prerequisites(&mut persistence);
    persistence
        .upsert_business_code(&BusinessClassCode::new("017", "Retail"))
        .expect("Upsert should succeed");

    let records: Vec<RateRecord> = vec![
        RateRecord::routed(
            version_id,
            jurisdiction_id,
            "011",
            JurisdictionLevel::County,
            0.005,
        ),
        RateRecord::routed(
            version_id,
            jurisdiction_id,
            "017",
            JurisdictionLevel::County,
            0.007,
        ),
    ];
    let inserted: usize = persistence
        .insert_rates(&records)
        .expect("Insert should succeed");
    assert_eq!(inserted, 2);

    let keys = persistence
        .existing_rate_keys(version_id)
        .expect("Key load should succeed");
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&(jurisdiction_id, "011".to_string())));
    assert!(keys.contains(&(jurisdiction_id, "017".to_string())));
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut persistence: Persistence = create_test_persistence();
    let inserted: usize = persistence
        .insert_rates(&[])
        .expect("Empty insert should succeed");
    assert_eq!(inserted, 0);
}

#[test]
fn insert_with_unknown_version_violates_foreign_key() {
    let mut persistence: Persistence = create_test_persistence();
    let (jurisdiction_id, _) = seed_rate_prerequisites(&mut persistence);

    let orphan: RateRecord =
        RateRecord::routed(999, jurisdiction_id, "011", JurisdictionLevel::County, 0.005);
    let result = persistence.insert_rates(&[orphan]);
    assert!(result.is_err(), "Foreign key violation should surface");
}

#[test]
fn listing_joins_jurisdictions_and_derives_total() {
    let mut persistence: Persistence = create_test_persistence();
    let (county_id, version_id) = seed_rate_prerequisites(&mut persistence);
    let city_id: i64 = persistence
        .insert_jurisdiction(&Jurisdiction::new("PX", "Phoenix", JurisdictionLevel::City))
        .expect("City insert should succeed");

    persistence
        .insert_rates(&[
            RateRecord::routed(version_id, county_id, "011", JurisdictionLevel::County, 0.005),
            RateRecord::routed(version_id, city_id, "011", JurisdictionLevel::City, 0.023),
        ])
        .expect("Insert should succeed");

    let all = persistence
        .list_rates(version_id, None, None, None)
        .expect("Listing should succeed");
    assert_eq!(all.len(), 2);

    // Ordered by region code: MAR before PX.
    assert_eq!(all[0].region_code, "MAR");
    assert_eq!(all[0].level, "county");
    assert!((all[0].county_rate - 0.005).abs() < f64::EPSILON);
    assert!((all[0].total_rate - 0.005).abs() < f64::EPSILON);

    assert_eq!(all[1].region_code, "PX");
    assert_eq!(all[1].jurisdiction_name, "Phoenix");
    assert_eq!(all[1].level, "city");
    assert!((all[1].city_rate - 0.023).abs() < f64::EPSILON);
    assert!((all[1].county_rate).abs() < f64::EPSILON);

    let filtered = persistence
        .list_rates(version_id, Some("PX"), None, None)
        .expect("Filtered listing should succeed");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].region_code, "PX");

    let none = persistence
        .list_rates(version_id, Some("PX"), Some("999"), None)
        .expect("Filtered listing should succeed");
    assert!(none.is_empty());

    let high = persistence
        .list_rates(version_id, None, None, Some(0.01))
        .expect("Filtered listing should succeed");
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].region_code, "PX");
}

#[test]
fn county_coverage_reports_missing_counties() {
    let mut persistence: Persistence = create_test_persistence();
    let (county_id, version_id) = seed_rate_prerequisites(&mut persistence);

    persistence
        .insert_rates(&[RateRecord::routed(
            version_id,
            county_id,
            "011",
            JurisdictionLevel::County,
            0.005,
        )])
        .expect("Insert should succeed");

    let coverage = persistence
        .county_coverage(version_id)
        .expect("Coverage should succeed");
    assert_eq!(coverage.rate_version_id, version_id);
    assert_eq!(coverage.present, vec!["MAR".to_string()]);
    assert_eq!(coverage.missing.len(), 14);
    assert!(coverage.missing.contains(&"PMA".to_string()));
    assert!(!coverage.missing.contains(&"MAR".to_string()));
}

#[test]
fn county_coverage_requires_an_existing_version() {
    let mut persistence: Persistence = create_test_persistence();
    let result = persistence.county_coverage(42);
    assert!(matches!(result, Err(PersistenceError::VersionNotFound(42))));
}
