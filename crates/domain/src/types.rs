// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The level of a taxing jurisdiction.
///
/// Every jurisdiction has exactly one level, set at creation. The level
/// decides which rate column a jurisdiction's rates are routed into: a
/// county's rates must never populate the city-rate slot and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JurisdictionLevel {
    /// County-level jurisdiction (one of the 15 Arizona counties).
    County,
    /// City-level jurisdiction. The default for unrecognized region codes.
    City,
}

impl JurisdictionLevel {
    /// Converts this level to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::County => "county",
            Self::City => "city",
        }
    }
}

impl FromStr for JurisdictionLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "county" => Ok(Self::County),
            "city" => Ok(Self::City),
            _ => Err(DomainError::InvalidLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for JurisdictionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A taxing jurisdiction: a county or a city.
///
/// The region code (short alphanumeric, e.g. `PX` or `MAR`) is the unique
/// business key. `jurisdiction_id` is the canonical numeric ID assigned by
/// the database; `None` indicates the jurisdiction has not been persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jurisdiction {
    /// The canonical numeric identifier assigned by the database.
    jurisdiction_id: Option<i64>,
    /// The region code (unique business key).
    region_code: String,
    /// Display name (e.g. "Phoenix", "Maricopa").
    name: String,
    /// The jurisdiction level. Set at creation; must not silently flip.
    level: JurisdictionLevel,
    /// Parent county region code, for city jurisdictions only.
    county_region_code: Option<String>,
}

// Two jurisdictions are equal if they carry the same region code,
// regardless of their persisted IDs.
impl PartialEq for Jurisdiction {
    fn eq(&self, other: &Self) -> bool {
        self.region_code == other.region_code
    }
}

impl Eq for Jurisdiction {}

impl std::hash::Hash for Jurisdiction {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.region_code.hash(state);
    }
}

impl Jurisdiction {
    /// Creates a new `Jurisdiction` without a persisted ID.
    ///
    /// An empty display name falls back to `<code> City` for cities and the
    /// bare region code for counties, matching how the source files describe
    /// jurisdictions that ship without a `RegionName`.
    #[must_use]
    pub fn new(region_code: &str, name: &str, level: JurisdictionLevel) -> Self {
        let name: String = if name.trim().is_empty() {
            match level {
                JurisdictionLevel::City => format!("{region_code} City"),
                JurisdictionLevel::County => region_code.to_string(),
            }
        } else {
            name.trim().to_string()
        };
        Self {
            jurisdiction_id: None,
            region_code: region_code.to_string(),
            name,
            level,
            county_region_code: None,
        }
    }

    /// Creates a `Jurisdiction` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        jurisdiction_id: i64,
        region_code: &str,
        name: &str,
        level: JurisdictionLevel,
        county_region_code: Option<String>,
    ) -> Self {
        Self {
            jurisdiction_id: Some(jurisdiction_id),
            region_code: region_code.to_string(),
            name: name.to_string(),
            level,
            county_region_code,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn jurisdiction_id(&self) -> Option<i64> {
        self.jurisdiction_id
    }

    /// Returns the region code.
    #[must_use]
    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the jurisdiction level.
    #[must_use]
    pub const fn level(&self) -> JurisdictionLevel {
        self.level
    }

    /// Returns the parent county region code, for cities that carry one.
    #[must_use]
    pub fn county_region_code(&self) -> Option<&str> {
        self.county_region_code.as_deref()
    }
}

/// A business class code: classification of a type of commerce subject to
/// its own rate (e.g. `011` Restaurants and Bars, `017` Retail).
///
/// Created lazily on first sight; the description may be refreshed by later
/// uploads but the code never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessClassCode {
    /// The short numeric code string (e.g. "011").
    code: String,
    /// Human-readable description.
    description: String,
}

impl BusinessClassCode {
    /// Creates a new `BusinessClassCode`.
    ///
    /// An empty description falls back to `Business Code <code>`.
    #[must_use]
    pub fn new(code: &str, description: &str) -> Self {
        let description: String = if description.trim().is_empty() {
            format!("Business Code {code}")
        } else {
            description.trim().to_string()
        };
        Self {
            code: code.to_string(),
            description,
        }
    }

    /// Returns the code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A rate version: a named snapshot of all rates effective as of a date.
///
/// At most one version exists per effective date. A version's date, once
/// created, is immutable for the remainder of the system's operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateVersion {
    /// The canonical numeric identifier assigned by the database.
    rate_version_id: Option<i64>,
    /// The calendar date from which this version's rates apply.
    effective_date: Date,
}

impl RateVersion {
    /// Creates a new `RateVersion` without a persisted ID.
    #[must_use]
    pub const fn new(effective_date: Date) -> Self {
        Self {
            rate_version_id: None,
            effective_date,
        }
    }

    /// Creates a `RateVersion` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(rate_version_id: i64, effective_date: Date) -> Self {
        Self {
            rate_version_id: Some(rate_version_id),
            effective_date,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn rate_version_id(&self) -> Option<i64> {
        self.rate_version_id
    }

    /// Returns the effective date.
    #[must_use]
    pub const fn effective_date(&self) -> Date {
        self.effective_date
    }
}

/// A single persisted rate row: one rate for one jurisdiction, one business
/// class, in one rate version.
///
/// Identity is the (`rate_version_id`, `jurisdiction_id`, `business_code`)
/// triple. `state_rate` is always 0 in this domain; exactly one of
/// `county_rate` / `city_rate` is non-zero, decided solely by the owning
/// jurisdiction's level. Construct via [`RateRecord::routed`] so the routing
/// invariant cannot be violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    /// The owning rate version.
    pub rate_version_id: i64,
    /// The owning jurisdiction.
    pub jurisdiction_id: i64,
    /// The business class code.
    pub business_code: String,
    /// State-level rate component. Always 0 for ADOR source data.
    pub state_rate: f64,
    /// County-level rate component.
    pub county_rate: f64,
    /// City-level rate component.
    pub city_rate: f64,
}

impl RateRecord {
    /// Builds a rate record with the rate routed into the column matching
    /// the owning jurisdiction's level.
    ///
    /// Routing is derived from the level alone, never from the rate's
    /// magnitude or source column.
    #[must_use]
    pub fn routed(
        rate_version_id: i64,
        jurisdiction_id: i64,
        business_code: &str,
        level: JurisdictionLevel,
        rate: f64,
    ) -> Self {
        let (county_rate, city_rate): (f64, f64) = match level {
            JurisdictionLevel::County => (rate, 0.0),
            JurisdictionLevel::City => (0.0, rate),
        };
        Self {
            rate_version_id,
            jurisdiction_id,
            business_code: business_code.to_string(),
            state_rate: 0.0,
            county_rate,
            city_rate,
        }
    }

    /// Returns the derived total rate: state + county + city.
    #[must_use]
    pub fn total_rate(&self) -> f64 {
        self.state_rate + self.county_rate + self.city_rate
    }

    /// Returns the dedupe key for this record within its version.
    #[must_use]
    pub fn key(&self) -> (i64, String) {
        (self.jurisdiction_id, self.business_code.clone())
    }
}
