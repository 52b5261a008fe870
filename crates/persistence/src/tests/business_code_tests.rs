// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use az_tpt_domain::BusinessClassCode;

use super::create_test_persistence;
use crate::Persistence;

#[test]
fn upsert_refreshes_description() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .upsert_business_code(&BusinessClassCode::new("017", "Retail"))
        .expect("Upsert should succeed");
    persistence
        .upsert_business_code(&BusinessClassCode::new("017", "Retail Classification"))
        .expect("Upsert should succeed");

    let codes = persistence
        .load_business_codes()
        .expect("Load should succeed");
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].description(), "Retail Classification");
}

#[test]
fn placeholder_never_clobbers_real_description() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .upsert_business_code(&BusinessClassCode::new("017", "Retail"))
        .expect("Upsert should succeed");
    // An empty description produces the placeholder form.
    persistence
        .ensure_business_code(&BusinessClassCode::new("017", ""))
        .expect("Ensure should succeed");

    let codes = persistence
        .load_business_codes()
        .expect("Load should succeed");
    assert_eq!(codes[0].description(), "Retail");
}

#[test]
fn ensure_creates_missing_code_with_placeholder() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .ensure_business_code(&BusinessClassCode::new("029", ""))
        .expect("Ensure should succeed");

    let codes = persistence
        .load_business_codes()
        .expect("Load should succeed");
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].code(), "029");
    assert_eq!(codes[0].description(), "Business Code 029");
}
