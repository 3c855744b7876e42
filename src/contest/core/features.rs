//! Player feature matrix and the per-contest feature index.
//!
//! Purpose
//! -------
//! Hold the `N_players × K` feature matrix `X` together with the player pairs
//! of every contest, and provide the single checked access path from a
//! 1-based player index to that player's feature row.
//!
//! Key behaviors
//! -------------
//! - [`FeatureMatrix::from_column_major`] reads a flat buffer laid out as all
//!   players' values of feature 1, then feature 2, and so on.
//! - [`FeatureMatrix::feature_row`] is the only place where the upper bound
//!   `index ≤ N_players` is enforced; violations are reported with the
//!   [`EvalSite`] of the caller.
//! - [`FeatureIndex`] bundles sizes, matrix, and pairs for a model.
//!
//! Invariants & assumptions
//! ------------------------
//! - `X` has at least one row and one column and is immutable after
//!   construction.
//! - Pair indexes are at least 1; the upper bound is checked lazily.
//!
//! Conventions
//! -----------
//! - Player indexes are 1-based throughout; row `p` of `X` is stored at
//!   position `p - 1`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the column-major layout, buffer length checks, and
//!   both bounds of `feature_row`.
use crate::contest::{
    core::{pairs::PlayerPairs, shape::ContestShape, site::EvalSite},
    errors::{ContestError, ContestResult},
};
use ndarray::{Array2, ArrayView1, ArrayView2, ShapeBuilder};

/// Dense `N_players × K` feature matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    x: Array2<f64>,
}

impl FeatureMatrix {
    /// Build `X` from a column-major buffer of length `n_players * k`.
    ///
    /// # Errors
    /// - `BufferLengthMismatch` (field `X`) if the buffer length is wrong.
    ///
    /// # Examples
    /// ```
    /// use rust_bpc::contest::core::features::FeatureMatrix;
    /// // Two players, two features: X = [[1, 3], [2, 4]].
    /// let x = FeatureMatrix::from_column_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(x.matrix()[[0, 1]], 3.0);
    /// ```
    pub fn from_column_major(n_players: usize, k: usize, buffer: &[f64]) -> ContestResult<Self> {
        let expected = n_players * k;
        if buffer.len() != expected {
            return Err(ContestError::BufferLengthMismatch {
                field: "X",
                expected,
                actual: buffer.len(),
            });
        }
        let x = Array2::from_shape_vec((n_players, k).f(), buffer.to_vec()).map_err(|_| {
            ContestError::BufferLengthMismatch { field: "X", expected, actual: buffer.len() }
        })?;
        Ok(FeatureMatrix { x })
    }

    /// Wrap an already row-indexed matrix, checking it against the declared sizes.
    pub fn from_rows(x: Array2<f64>, n_players: usize, k: usize) -> ContestResult<Self> {
        if x.dim() != (n_players, k) {
            return Err(ContestError::BufferLengthMismatch {
                field: "X",
                expected: n_players * k,
                actual: x.len(),
            });
        }
        Ok(FeatureMatrix { x })
    }

    pub fn n_players(&self) -> usize {
        self.x.nrows()
    }

    pub fn k(&self) -> usize {
        self.x.ncols()
    }

    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    /// Feature row of a 1-based player index.
    ///
    /// # Errors
    /// - `PlayerIndexOutOfRange` tagged with `site` if the index is 0 or
    ///   exceeds `N_players`.
    pub fn feature_row(&self, player_index: usize, site: EvalSite) -> ContestResult<ArrayView1<'_, f64>> {
        let n_players = self.n_players();
        if player_index == 0 || player_index > n_players {
            return Err(ContestError::PlayerIndexOutOfRange {
                site,
                index: player_index,
                n_players,
            });
        }
        Ok(self.x.row(player_index - 1))
    }
}

/// Sizes, feature matrix, and contest pairs of one data set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureIndex {
    shape: ContestShape,
    features: FeatureMatrix,
    pairs: PlayerPairs,
}

impl FeatureIndex {
    /// Build the index from validated sizes, a column-major `X`, and the
    /// two player-index arrays.
    ///
    /// # Errors
    /// - `BufferLengthMismatch` if `X` or an index array has the wrong length.
    /// - `InvalidPlayerIndex` if an index is below 1.
    pub fn new(
        shape: ContestShape, x_column_major: &[f64], player0: &[i64], player1: &[i64],
    ) -> ContestResult<Self> {
        let pairs = PlayerPairs::new(player0, player1, shape.n_obs)?;
        let features = FeatureMatrix::from_column_major(shape.n_players, shape.k, x_column_major)?;
        Ok(FeatureIndex { shape, features, pairs })
    }

    /// Same as [`FeatureIndex::new`] with an `N_players × K` matrix.
    pub fn from_matrix(
        shape: ContestShape, x: Array2<f64>, player0: &[i64], player1: &[i64],
    ) -> ContestResult<Self> {
        let pairs = PlayerPairs::new(player0, player1, shape.n_obs)?;
        let features = FeatureMatrix::from_rows(x, shape.n_players, shape.k)?;
        Ok(FeatureIndex { shape, features, pairs })
    }

    pub fn shape(&self) -> &ContestShape {
        &self.shape
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn pairs(&self) -> &PlayerPairs {
        &self.pairs
    }

    /// Feature row of a 1-based player index, see [`FeatureMatrix::feature_row`].
    pub fn feature_row(&self, player_index: usize, site: EvalSite) -> ContestResult<ArrayView1<'_, f64>> {
        self.features.feature_row(player_index, site)
    }
}
