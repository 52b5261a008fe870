// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rate token normalization.
//!
//! ADOR publishes most rates as percentages with magnitude greater than one
//! (`6.3` meaning 6.3%), but a minority of special tax types (severance, jet
//! fuel, E911 surcharges, commercial lease) as small sub-1 decimals that are
//! already fractions. The magnitude heuristic below is the load-bearing
//! business rule of the whole pipeline.

use tracing::warn;

/// Normalizes a raw rate token to a fraction rounded to 6 decimal places.
///
/// Algorithm:
/// - strip whitespace and any `%` character; empty input is `0.0`
/// - parse as a float; unparseable input is `0.0` (with a warning logged)
/// - a value strictly greater than 1 is treated as a percentage and divided
///   by 100; anything else is treated as already a fraction
///
/// A value of exactly `1.0` (100%) is treated as already-a-fraction, not a
/// percentage. Whether that boundary is correct for a legitimate 100% rate
/// is an unresolved ambiguity inherited from the source data; do not move it.
#[must_use]
pub fn normalize_rate(token: &str) -> f64 {
    let cleaned: String = token.trim().replace('%', "");
    if cleaned.is_empty() {
        return 0.0;
    }

    let Ok(value) = cleaned.parse::<f64>() else {
        warn!(token = %token, "Could not parse rate token, using 0.0");
        return 0.0;
    };

    let fraction: f64 = if value > 1.0 { value / 100.0 } else { value };
    round6(fraction)
}

/// Rounds a fraction to 6 decimal places.
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
