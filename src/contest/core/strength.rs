//! Linear player strengths.
//!
//! A player's strength is the dot product of its feature row with the shared
//! coefficient vector: `lambda_p = X[p, :] · B`. Both models evaluate it twice
//! per contest; the Davidson model also reports it for every player as a
//! generated quantity.
use crate::contest::{
    core::{features::FeatureIndex, features::FeatureMatrix, site::EvalSite},
    errors::{ContestError, ContestResult},
};
use ndarray::{Array1, ArrayView1};

/// Strength of one player (1-based index).
///
/// # Errors
/// - `CoefficientLengthMismatch` if `b.len() != K`.
/// - `PlayerIndexOutOfRange` tagged with `site` if the index is invalid.
pub fn strength(
    features: &FeatureMatrix, player_index: usize, b: ArrayView1<f64>, site: EvalSite,
) -> ContestResult<f64> {
    check_coefficients(b, features.k())?;
    let row = features.feature_row(player_index, site)?;
    Ok(row.dot(&b))
}

/// Strengths `(lambda0, lambda1)` of the two players in contest `i` (0-based).
///
/// Index errors are tagged with `site`; a `B` of the wrong length is a
/// `CoefficientLengthMismatch`.
pub fn pair_strengths(
    index: &FeatureIndex, i: usize, b: ArrayView1<f64>, site: EvalSite,
) -> ContestResult<(f64, f64)> {
    let (p0, p1) = index.pairs().pair(i);
    let lambda0 = strength(index.features(), p0, b, site)?;
    let lambda1 = strength(index.features(), p1, b, site)?;
    Ok((lambda0, lambda1))
}

/// Strength of every player, `lambda[p] = X[p, :] · B` for `p = 1..=N_players`.
///
/// # Errors
/// - `CoefficientLengthMismatch` if `b.len() != K`.
pub fn all_strengths(features: &FeatureMatrix, b: ArrayView1<f64>) -> ContestResult<Array1<f64>> {
    (1..=features.n_players())
        .map(|p| strength(features, p, b, EvalSite::PlayerStrength { player: p }))
        .collect::<ContestResult<Vec<f64>>>()
        .map(Array1::from)
}

/// `B` must have exactly `K` entries.
pub fn check_coefficients(b: ArrayView1<f64>, k: usize) -> ContestResult<()> {
    if b.len() != k {
        return Err(ContestError::CoefficientLengthMismatch { expected: k, actual: b.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::core::shape::ContestShape;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Single-feature and two-feature strengths against hand dot products.
    // - Pair strengths and error tagging.
    // - The coefficient-length check on every entry point.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // One feature, two players.
    //
    // Given
    // -----
    // - `X = [[1], [2]]`, `B = [0.5]`.
    //
    // Expect
    // ------
    // - `lambda = [0.5, 1.0]`.
    fn single_feature_strengths() {
        let x = FeatureMatrix::from_column_major(2, 1, &[1.0, 2.0]).unwrap();
        let b = array![0.5];
        let lambda = all_strengths(&x, b.view()).unwrap();
        assert_eq!(lambda, array![0.5, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // Two features, three players, compared with hand-computed dot products.
    //
    // Given
    // -----
    // - `X = [[1, 0], [0, 1], [2, -1]]`, `B = [0.3, -0.7]`.
    //
    // Expect
    // ------
    // - `lambda = [0.3, -0.7, 1.3]`.
    fn two_feature_strengths_match_hand_dot_products() {
        let x = FeatureMatrix::from_column_major(3, 2, &[1.0, 0.0, 2.0, 0.0, 1.0, -1.0]).unwrap();
        let b = array![0.3, -0.7];
        let lambda = all_strengths(&x, b.view()).unwrap();
        let expected = [1.0 * 0.3 + 0.0 * -0.7, 0.0 * 0.3 + 1.0 * -0.7, 2.0 * 0.3 + -1.0 * -0.7];
        for (got, want) in lambda.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Pair strengths read the right rows and surface bad indexes with the site.
    //
    // Given
    // -----
    // - Contests `1 vs 2` and `2 vs 3` with only two players.
    //
    // Expect
    // ------
    // - Contest 1 gives `(0.5, 1.0)`; contest 2 fails at observation 2.
    fn pair_strengths_reads_rows_and_tags_errors() {
        let shape = ContestShape::davidson(2, 2, 1).unwrap();
        let index = FeatureIndex::new(shape, &[1.0, 2.0], &[1, 2], &[2, 3]).unwrap();
        let b = array![0.5];
        let site = EvalSite::Observation { i: 1 };
        assert_eq!(pair_strengths(&index, 0, b.view(), site), Ok((0.5, 1.0)));

        let site = EvalSite::Observation { i: 2 };
        let err = pair_strengths(&index, 1, b.view(), site).unwrap_err();
        assert_eq!(err, ContestError::PlayerIndexOutOfRange { site, index: 3, n_players: 2 });
    }

    #[test]
    // Purpose
    // -------
    // `B` of the wrong length is rejected before any dot product.
    //
    // Given
    // -----
    // - `K = 1` and `B = [1, 2]`.
    //
    // Expect
    // ------
    // - `CoefficientLengthMismatch { expected: 1, actual: 2 }`.
    fn wrong_coefficient_length_is_rejected() {
        let x = FeatureMatrix::from_column_major(2, 1, &[1.0, 2.0]).unwrap();
        let b = array![1.0, 2.0];
        assert_eq!(
            all_strengths(&x, b.view()),
            Err(ContestError::CoefficientLengthMismatch { expected: 1, actual: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Single-player and pair strengths return an error for a mismatched `B`
    // instead of panicking inside the dot product.
    //
    // Given
    // -----
    // - `K = 1`, one contest `1 vs 2`, and `B` of length 0 or 2.
    //
    // Expect
    // ------
    // - `CoefficientLengthMismatch` from `strength` and `pair_strengths`,
    //   even when the player index is also out of range.
    fn mismatched_coefficients_fail_for_single_and_pair_strengths() {
        let shape = ContestShape::davidson(1, 2, 1).unwrap();
        let index = FeatureIndex::new(shape, &[1.0, 2.0], &[1], &[2]).unwrap();
        let site = EvalSite::Observation { i: 1 };

        let long = array![1.0, 2.0];
        assert_eq!(
            strength(index.features(), 1, long.view(), site),
            Err(ContestError::CoefficientLengthMismatch { expected: 1, actual: 2 })
        );
        assert_eq!(
            strength(index.features(), 9, long.view(), site),
            Err(ContestError::CoefficientLengthMismatch { expected: 1, actual: 2 })
        );

        let empty = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(
            pair_strengths(&index, 0, empty.view(), site),
            Err(ContestError::CoefficientLengthMismatch { expected: 1, actual: 0 })
        );
    }
}
