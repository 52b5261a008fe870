// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rate version management.

use az_tpt_domain::RateVersion;
use az_tpt_persistence::PersistenceError;
use time::Date;
use tracing::debug;

use crate::store::RateStore;

/// Returns the rate version for an effective date, creating it if absent.
///
/// Read-then-write: uploads for the same date land in the same version,
/// which is what makes re-uploads idempotent rather than duplicating.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_or_create_version<S: RateStore>(
    store: &mut S,
    effective_date: Date,
) -> Result<RateVersion, PersistenceError> {
    if let Some(existing) = store.find_rate_version(effective_date)? {
        debug!(
            rate_version_id = existing.rate_version_id(),
            "Reusing existing rate version"
        );
        return Ok(existing);
    }
    store.create_rate_version(effective_date)
}
