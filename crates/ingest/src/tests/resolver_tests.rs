// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use az_tpt_domain::{Jurisdiction, JurisdictionLevel};

use super::MemoryStore;
use crate::JurisdictionResolver;

#[test]
fn resolves_known_codes_from_cache_without_store_calls() {
    let mut store: MemoryStore = MemoryStore::new();
    store
        .jurisdictions
        .push(Jurisdiction::with_id(7, "PX", "Phoenix", JurisdictionLevel::City, None));

    let mut resolver =
        JurisdictionResolver::load(&mut store, true).expect("Load should succeed");
    assert_eq!(store.load_jurisdiction_calls, 1);
    assert_eq!(resolver.cached_count(), 1);

    let resolved = resolver
        .resolve(&mut store, "PX", "Phoenix")
        .expect("Resolve should succeed")
        .expect("Known code should resolve");
    assert_eq!(resolved.jurisdiction_id(), Some(7));
    // No insert happened; only the initial load touched the store.
    assert_eq!(store.load_jurisdiction_calls, 1);
    assert!(store.jurisdictions.len() == 1);
}

#[test]
fn creates_county_for_county_region_code() {
    let mut store: MemoryStore = MemoryStore::new();
    let mut resolver =
        JurisdictionResolver::load(&mut store, true).expect("Load should succeed");

    let resolved = resolver
        .resolve(&mut store, "MAR", "")
        .expect("Resolve should succeed")
        .expect("County should be created");

    assert_eq!(resolved.level(), JurisdictionLevel::County);
    // Canonical county name, not the empty file name.
    assert_eq!(resolved.name(), "Maricopa");
    assert!(resolved.jurisdiction_id().is_some());
    assert_eq!(store.jurisdictions.len(), 1);
}

#[test]
fn creates_city_for_unrecognized_region_code() {
    let mut store: MemoryStore = MemoryStore::new();
    let mut resolver =
        JurisdictionResolver::load(&mut store, true).expect("Load should succeed");

    let resolved = resolver
        .resolve(&mut store, "PX", "Phoenix")
        .expect("Resolve should succeed")
        .expect("City should be created");
    assert_eq!(resolved.level(), JurisdictionLevel::City);
    assert_eq!(resolved.name(), "Phoenix");
}

#[test]
fn created_jurisdictions_are_cached_for_later_rows() {
    let mut store: MemoryStore = MemoryStore::new();
    let mut resolver =
        JurisdictionResolver::load(&mut store, true).expect("Load should succeed");

    let first = resolver
        .resolve(&mut store, "PX", "Phoenix")
        .expect("Resolve should succeed")
        .expect("City should be created");
    let second = resolver
        .resolve(&mut store, "PX", "Phoenix")
        .expect("Resolve should succeed")
        .expect("Cached city should resolve");

    assert_eq!(first.jurisdiction_id(), second.jurisdiction_id());
    // Only one insert happened.
    assert_eq!(store.jurisdictions.len(), 1);
}

#[test]
fn unknown_codes_resolve_to_none_when_creation_disabled() {
    let mut store: MemoryStore = MemoryStore::new();
    let mut resolver =
        JurisdictionResolver::load(&mut store, false).expect("Load should succeed");

    let resolved = resolver
        .resolve(&mut store, "PX", "Phoenix")
        .expect("Resolve should succeed");
    assert!(resolved.is_none());
    assert!(store.jurisdictions.is_empty());
}
