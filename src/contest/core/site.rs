//! Evaluation-site tags carried by evaluation-time errors.
//!
//! A failure inside the log density or the generated quantities is reported
//! together with the place where it happened: which prior term, which
//! observation, which player. The tag is threaded explicitly through the
//! computation as a plain `Copy` value; there is no global "current location"
//! state.
//!
//! All positions stored in an [`EvalSite`] are **1-based**, matching the
//! indexing of the contest data itself.
use std::fmt;

/// Where in a model evaluation a value was being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalSite {
    /// Normal prior on the coefficient vector `B`.
    PriorB,
    /// Normal prior on the tie parameter `nu`.
    PriorNu,
    /// Likelihood term of observation `i` (1-based).
    Observation { i: usize },
    /// Generated strength `lambda[player]` (1-based).
    PlayerStrength { player: usize },
    /// Predictive draw for new pair `i` (1-based).
    Prediction { i: usize },
}

impl fmt::Display for EvalSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalSite::PriorB => write!(f, "prior on B"),
            EvalSite::PriorNu => write!(f, "prior on nu"),
            EvalSite::Observation { i } => write!(f, "observation {i}"),
            EvalSite::PlayerStrength { player } => write!(f, "strength of player {player}"),
            EvalSite::Prediction { i } => write!(f, "prediction {i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that site tags render with their 1-based positions.
    //
    // Given
    // -----
    // - One tag per variant carrying a position.
    //
    // Expect
    // ------
    // - The rendered text names the position verbatim.
    fn display_reports_one_based_positions() {
        assert_eq!(EvalSite::Observation { i: 3 }.to_string(), "observation 3");
        assert_eq!(EvalSite::PlayerStrength { player: 1 }.to_string(), "strength of player 1");
        assert_eq!(EvalSite::Prediction { i: 7 }.to_string(), "prediction 7");
        assert_eq!(EvalSite::PriorNu.to_string(), "prior on nu");
    }
}
