//! Per-observation player pairs.
use crate::contest::{core::validation::validate_player_indexes, errors::ContestResult};

/// The two 1-based player indexes of every contest.
///
/// Indexes are guaranteed to be at least 1. They are not checked against
/// the number of players; the feature lookup does that when a row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPairs {
    player0: Vec<usize>,
    player1: Vec<usize>,
}

impl PlayerPairs {
    /// Build pairs from `player0_indexes` and `player1_indexes`.
    ///
    /// # Errors
    /// - `BufferLengthMismatch` if either array's length differs from `n_obs`.
    /// - `InvalidPlayerIndex` for the first index below 1.
    pub fn new(player0: &[i64], player1: &[i64], n_obs: usize) -> ContestResult<Self> {
        let player0 = validate_player_indexes("player0_indexes", player0, n_obs)?;
        let player1 = validate_player_indexes("player1_indexes", player1, n_obs)?;
        Ok(PlayerPairs { player0, player1 })
    }

    pub fn len(&self) -> usize {
        self.player0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player0.is_empty()
    }

    /// `(player0, player1)` of observation `i` (0-based position).
    ///
    /// # Panics
    /// - If `i >= self.len()`.
    pub fn pair(&self, i: usize) -> (usize, usize) {
        (self.player0[i], self.player1[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::errors::{ContestError, ErrorKind};

    #[test]
    // Purpose
    // -------
    // A zero in `player0_indexes` is a configuration error.
    //
    // Given
    // -----
    // - `player0_indexes = [1, 0]`, `player1_indexes = [2, 1]`.
    //
    // Expect
    // ------
    // - `InvalidPlayerIndex` at position 2, classified as configuration.
    fn zero_player0_index_is_configuration_error() {
        let err = PlayerPairs::new(&[1, 0], &[2, 1], 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(
            err,
            ContestError::InvalidPlayerIndex { field: "player0_indexes", position: 2, value: 0 }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Pairs are returned in input order.
    //
    // Given
    // -----
    // - Two contests `1 vs 2` and `3 vs 1`.
    //
    // Expect
    // ------
    // - `pair(1) == (3, 1)`.
    fn pair_returns_input_order() {
        let pairs = PlayerPairs::new(&[1, 3], &[2, 1], 2).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.pair(0), (1, 2));
        assert_eq!(pairs.pair(1), (3, 1));
    }
}
