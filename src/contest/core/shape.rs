//! Problem sizes for contest models.
//!
//! - `n_obs`: number of contests (`N_total` for the Davidson model,
//!   `N_newdata` for prediction).
//! - `n_players`: number of rows in the feature matrix.
//! - `k`: number of features per player (length of `B`).
//!
//! All three must be at least 1.
use crate::contest::{core::validation::validate_count, errors::ContestResult};

/// Validated sizes of a contest data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestShape {
    pub n_obs: usize,
    pub n_players: usize,
    pub k: usize,
}

impl ContestShape {
    /// Sizes for the Davidson model (`N_total`, `N_players`, `K`).
    ///
    /// # Errors
    /// - [`crate::contest::errors::ContestError::InvalidCount`] naming the
    ///   first count below 1.
    pub fn davidson(n_total: i64, n_players: i64, k: i64) -> ContestResult<Self> {
        Self::build(("N_total", n_total), n_players, k)
    }

    /// Sizes for the prediction model (`N_newdata`, `N_players`, `K`).
    ///
    /// # Errors
    /// - [`crate::contest::errors::ContestError::InvalidCount`] naming the
    ///   first count below 1.
    pub fn predict(n_newdata: i64, n_players: i64, k: i64) -> ContestResult<Self> {
        Self::build(("N_newdata", n_newdata), n_players, k)
    }

    fn build(obs: (&'static str, i64), n_players: i64, k: i64) -> ContestResult<Self> {
        let n_obs = validate_count(obs.0, obs.1)?;
        let n_players = validate_count("N_players", n_players)?;
        let k = validate_count("K", k)?;
        Ok(ContestShape { n_obs, n_players, k })
    }
}
