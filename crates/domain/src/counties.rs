// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The fixed set of Arizona county region codes.
//!
//! The Department of Revenue rate tables identify counties by three-letter
//! region codes. The set is closed: Arizona has fifteen counties, and any
//! region code outside this table is a city.

/// Region code and display name for each Arizona county.
pub const COUNTY_CODES: [(&str, &str); 15] = [
    ("APA", "Apache"),
    ("COH", "Cochise"),
    ("COC", "Coconino"),
    ("GLA", "Gila"),
    ("GRA", "Graham"),
    ("GRN", "Greenlee"),
    ("LAP", "La Paz"),
    ("MAR", "Maricopa"),
    ("MOH", "Mohave"),
    ("NAV", "Navajo"),
    ("PMA", "Pima"),
    ("PNL", "Pinal"),
    ("STC", "Santa Cruz"),
    ("YAV", "Yavapai"),
    ("YMA", "Yuma"),
];

/// Returns true when `region_code` names one of the fifteen Arizona counties.
#[must_use]
pub fn is_county_code(region_code: &str) -> bool {
    COUNTY_CODES.iter().any(|(code, _)| *code == region_code)
}

/// Returns the county display name for `region_code`, if it is a county code.
#[must_use]
pub fn county_name(region_code: &str) -> Option<&'static str> {
    COUNTY_CODES
        .iter()
        .find(|(code, _)| *code == region_code)
        .map(|(_, name)| *name)
}
