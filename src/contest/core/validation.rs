//! Validation helpers shared by the contest data containers.
//!
//! Purpose
//! -------
//! Centralize the construction-time checks applied to raw contest inputs so
//! that [`crate::contest::core::data`] and the feature containers can stay
//! small. Every helper returns the cleaned value on success and a
//! [`ContestError`] naming the offending field on failure.
//!
//! Key behaviors
//! -------------
//! - [`validate_count`]: counts must be at least 1.
//! - [`validate_player_indexes`]: lengths must match the observation count
//!   and each index must be at least 1. The upper bound is **not** checked
//!   here; it is checked when a row is dereferenced.
//! - [`validate_indicators`]: outcome/tie codes must lie in `0..=max`.
//! - [`validate_prior_scale`] / [`validate_prior_location`]: prior
//!   hyperparameters.
//! - [`validate_theta`]: optimizer-side check of an unconstrained vector.
//!
//! Conventions
//! -----------
//! - Positions in errors are 1-based.
//! - Integer inputs arrive as `i64` so that negative values coming from
//!   external sources can be rejected rather than wrapped.
use crate::contest::errors::{ContestError, ContestResult, ParamError, ParamResult};
use ndarray::ArrayView1;

/// Check that a count is at least 1 and convert it to `usize`.
///
/// # Errors
/// - [`ContestError::InvalidCount`] if `value < 1`.
pub fn validate_count(field: &'static str, value: i64) -> ContestResult<usize> {
    if value < 1 {
        return Err(ContestError::InvalidCount { field, value });
    }
    Ok(value as usize)
}

/// Check a player-index array against its expected length and lower bound.
///
/// # Errors
/// - [`ContestError::BufferLengthMismatch`] if `values.len() != expected_len`.
/// - [`ContestError::InvalidPlayerIndex`] for the first entry below 1.
pub fn validate_player_indexes(
    field: &'static str, values: &[i64], expected_len: usize,
) -> ContestResult<Vec<usize>> {
    if values.len() != expected_len {
        return Err(ContestError::BufferLengthMismatch {
            field,
            expected: expected_len,
            actual: values.len(),
        });
    }
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if value < 1 {
                Err(ContestError::InvalidPlayerIndex { field, position: i + 1, value })
            } else {
                Ok(value as usize)
            }
        })
        .collect()
}

/// Check an indicator array (`y` or `ties`) against its length and range.
///
/// # Errors
/// - [`ContestError::BufferLengthMismatch`] if `values.len() != expected_len`.
/// - [`ContestError::InvalidIndicator`] for the first entry outside `0..=max`.
pub fn validate_indicators(
    field: &'static str, values: &[i64], expected_len: usize, max: i64,
) -> ContestResult<Vec<u8>> {
    if values.len() != expected_len {
        return Err(ContestError::BufferLengthMismatch {
            field,
            expected: expected_len,
            actual: values.len(),
        });
    }
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if !(0..=max).contains(&value) {
                Err(ContestError::InvalidIndicator { field, position: i + 1, value, max })
            } else {
                Ok(value as u8)
            }
        })
        .collect()
}

/// Prior scales must be non-negative. `NaN` is rejected as well.
///
/// A scale of exactly zero or `+inf` is accepted here and rejected when the
/// density is evaluated.
pub fn validate_prior_scale(field: &'static str, value: f64) -> ContestResult<f64> {
    if value.is_nan() || value < 0.0 {
        return Err(ContestError::NegativePriorScale { field, value });
    }
    Ok(value)
}

/// Prior locations must be finite.
pub fn validate_prior_location(field: &'static str, value: f64) -> ContestResult<f64> {
    if !value.is_finite() {
        return Err(ContestError::InvalidPriorLocation { field, value });
    }
    Ok(value)
}

/// Validate an unconstrained vector before it is handed to the optimizer.
///
/// # Errors
/// - [`ParamError::ThetaLengthMismatch`] if `theta.len() != expected`.
/// - [`ParamError::NonFiniteTheta`] for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> ParamResult<()> {
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ParamError::NonFiniteTheta { index, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Lower-bound checks on counts and player indexes.
    // - Range checks on outcome and tie indicators.
    // - Prior hyperparameter checks.
    // - Theta length and finiteness checks.
    //
    // They intentionally DO NOT cover:
    // - Upper-bound checks on player indexes (performed at dereference time
    //   in `features`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that a zero count is a configuration error naming the field.
    //
    // Given
    // -----
    // - `K = 0`.
    //
    // Expect
    // ------
    // - `InvalidCount { field: "K", value: 0 }`.
    fn validate_count_rejects_zero() {
        assert_eq!(validate_count("K", 0), Err(ContestError::InvalidCount { field: "K", value: 0 }));
        assert_eq!(validate_count("K", 3), Ok(3));
    }

    #[test]
    // Purpose
    // -------
    // Verify that an index of 0 is rejected at construction while a large
    // index is accepted.
    //
    // Given
    // -----
    // - `[2, 0, 99]` for three observations.
    //
    // Expect
    // ------
    // - `InvalidPlayerIndex` at 1-based position 2.
    // - `[1, 99]` alone passes the lower-bound check.
    fn validate_player_indexes_checks_lower_bound_only() {
        let err = validate_player_indexes("player0_indexes", &[2, 0, 99], 3).unwrap_err();
        assert_eq!(
            err,
            ContestError::InvalidPlayerIndex { field: "player0_indexes", position: 2, value: 0 }
        );
        assert_eq!(validate_player_indexes("player1_indexes", &[1, 99], 2), Ok(vec![1, 99]));
    }

    #[test]
    // Purpose
    // -------
    // Ensure index arrays shorter than the observation count are rejected.
    //
    // Given
    // -----
    // - Two indexes for three observations.
    //
    // Expect
    // ------
    // - `BufferLengthMismatch { expected: 3, actual: 2 }`.
    fn validate_player_indexes_rejects_length_mismatch() {
        let err = validate_player_indexes("player1_indexes", &[1, 2], 3).unwrap_err();
        assert_eq!(
            err,
            ContestError::BufferLengthMismatch { field: "player1_indexes", expected: 3, actual: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Check indicator ranges for outcomes (0..=2) and ties (0..=1).
    //
    // Given
    // -----
    // - `y = [0, 1, 2]` and `ties = [0, 2]`.
    //
    // Expect
    // ------
    // - `y` passes; `ties` fails at position 2.
    fn validate_indicators_respects_max() {
        assert_eq!(validate_indicators("y", &[0, 1, 2], 3, 2), Ok(vec![0, 1, 2]));
        let err = validate_indicators("ties", &[0, 2], 2, 1).unwrap_err();
        assert_eq!(
            err,
            ContestError::InvalidIndicator { field: "ties", position: 2, value: 2, max: 1 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify prior scale handling: negative and NaN rejected, zero accepted.
    //
    // Given
    // -----
    // - Scales `-0.5`, `NaN`, `0.0`.
    //
    // Expect
    // ------
    // - Domain errors for the first two; `Ok(0.0)` for the last.
    fn validate_prior_scale_rejects_negative_and_nan() {
        assert!(validate_prior_scale("prior_lambda_std", -0.5).is_err());
        assert!(validate_prior_scale("prior_lambda_std", f64::NAN).is_err());
        assert_eq!(validate_prior_scale("prior_lambda_std", 0.0), Ok(0.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure theta validation reports both length and finiteness problems.
    //
    // Given
    // -----
    // - A length-2 vector checked against 3, and `[0.0, inf]` checked against 2.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`, then `NonFiniteTheta { index: 1 }`.
    fn validate_theta_reports_length_and_finiteness() {
        let short = array![0.0, 1.0];
        assert_eq!(
            validate_theta(short.view(), 3),
            Err(ParamError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );
        let bad = array![0.0, f64::INFINITY];
        assert_eq!(
            validate_theta(bad.view(), 2),
            Err(ParamError::NonFiniteTheta { index: 1, value: f64::INFINITY })
        );
    }
}
