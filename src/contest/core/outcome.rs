//! Outcome probabilities for a single contest.
//!
//! Purpose
//! -------
//! Turn the two player strengths of a contest (and, for the Davidson model,
//! the tie parameter `nu`) into outcome probabilities, the Bernoulli log mass
//! used by the likelihood, and the partial derivatives of one likelihood term.
//!
//! Key behaviors
//! -------------
//! - [`DavidsonProbs::new`] computes
//!   `p0 = exp(lambda0)`, `p1 = exp(lambda1)`,
//!   `geom = exp(nu + (lambda0 + lambda1) / 2)`, `Z = p0 + p1 + geom`,
//!   `p_draw = geom / Z` and `p_1win = p1 / Z`.
//! - [`bt_win_prob`] computes the two-outcome `p1 / (p0 + p1)`.
//! - [`bernoulli_ln_pmf`] returns `ln(theta)` for `y = 1` and
//!   `ln(1 - theta)` for `y = 0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - No clamping: overflow of `exp` propagates as `inf`/`NaN` under IEEE
//!   rules and shows up in the returned values.
//! - For finite inputs, `p_draw` and `p_1win` lie in `(0, 1)` and their sum
//!   is at most 1.
//!
//! Conventions
//! -----------
//! - A non-tie contest contributes `ln P(y | p_1win)`; the probability of
//!   "not a tie" is not factored in.
//!
//! Testing notes
//! -------------
//! - Unit tests check a hand-computed term, the probability bounds, and the
//!   analytic term gradient against central differences.

/// Davidson three-outcome quantities for one contest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DavidsonProbs {
    pub p0: f64,
    pub p1: f64,
    pub geom: f64,
    pub z: f64,
    pub p_draw: f64,
    pub p_1win: f64,
}

impl DavidsonProbs {
    pub fn new(lambda0: f64, lambda1: f64, nu: f64) -> Self {
        let p0 = lambda0.exp();
        let p1 = lambda1.exp();
        let geom = (nu + 0.5 * (lambda0 + lambda1)).exp();
        let z = p0 + p1 + geom;
        DavidsonProbs { p0, p1, geom, z, p_draw: geom / z, p_1win: p1 / z }
    }

    /// Probability that player 0 wins outright.
    pub fn p_0win(&self) -> f64 {
        self.p0 / self.z
    }

    /// Log-likelihood term of one contest.
    ///
    /// `tie == 1` scores `ln p_draw`; otherwise the outcome `y ∈ {0, 1}` is
    /// scored against `p_1win`. Range checks on `y` belong to the caller.
    pub fn log_term(&self, tie: u8, y: u8) -> f64 {
        if tie == 1 { bernoulli_ln_pmf(1, self.p_draw) } else { bernoulli_ln_pmf(y, self.p_1win) }
    }

    /// Partial derivatives `(∂/∂lambda0, ∂/∂lambda1, ∂/∂nu)` of [`Self::log_term`].
    ///
    /// With `∂Z/∂lambda0 = p0 + geom/2`, `∂Z/∂lambda1 = p1 + geom/2`,
    /// `∂Z/∂nu = geom`:
    /// - tie: `ln geom - ln Z`
    /// - `y = 1`: `lambda1 - ln Z`
    /// - `y = 0`: `ln(p0 + geom) - ln Z`
    pub fn log_term_grad(&self, tie: u8, y: u8) -> (f64, f64, f64) {
        let half_g = 0.5 * self.geom;
        let dz0 = (self.p0 + half_g) / self.z;
        let dz1 = (self.p1 + half_g) / self.z;
        let dznu = self.geom / self.z;
        if tie == 1 {
            (0.5 - dz0, 0.5 - dz1, 1.0 - dznu)
        } else if y == 1 {
            (-dz0, 1.0 - dz1, -dznu)
        } else {
            let lose = self.p0 + self.geom;
            ((self.p0 + half_g) / lose - dz0, half_g / lose - dz1, self.geom / lose - dznu)
        }
    }
}

/// Bradley–Terry probability that player 1 beats player 0.
pub fn bt_win_prob(lambda0: f64, lambda1: f64) -> f64 {
    let p0 = lambda0.exp();
    let p1 = lambda1.exp();
    p1 / (p0 + p1)
}

/// Bernoulli log mass `ln P(Y = y)` for success probability `theta`.
pub fn bernoulli_ln_pmf(y: u8, theta: f64) -> f64 {
    if y == 1 { theta.ln() } else { (-theta).ln_1p() }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - A hand-computed log-likelihood term.
    // - Probability bounds for finite strengths.
    // - Analytic term gradients against central differences.
    // - Bradley–Terry win probability limits.
    // -------------------------------------------------------------------------

    fn fd_term_grad(l0: f64, l1: f64, nu: f64, tie: u8, y: u8) -> (f64, f64, f64) {
        let h = 1e-6;
        let f = |a: f64, b: f64, c: f64| DavidsonProbs::new(a, b, c).log_term(tie, y);
        (
            (f(l0 + h, l1, nu) - f(l0 - h, l1, nu)) / (2.0 * h),
            (f(l0, l1 + h, nu) - f(l0, l1 - h, nu)) / (2.0 * h),
            (f(l0, l1, nu + h) - f(l0, l1, nu - h)) / (2.0 * h),
        )
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the single-contest term by hand.
    //
    // Given
    // -----
    // - `lambda0 = 0.5`, `lambda1 = 1.0`, `nu = 0`, no tie, `y = 1`.
    //
    // Expect
    // ------
    // - `ln(e^1 / (e^0.5 + e^1 + e^0.75))` within 1e-9.
    fn log_term_matches_hand_computation() {
        let probs = DavidsonProbs::new(0.5, 1.0, 0.0);
        let want = (1.0_f64.exp() / (0.5_f64.exp() + 1.0_f64.exp() + 0.75_f64.exp())).ln();
        assert!((probs.log_term(0, 1) - want).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Draw and player-1-win probabilities are proper and leave room for a
    // player-0 win.
    //
    // Given
    // -----
    // - A grid of finite strengths and tie parameters.
    //
    // Expect
    // ------
    // - `0 < p_draw < 1`, `0 < p_1win < 1`, `p_draw + p_1win ≤ 1`, and the
    //   three outcome probabilities sum to 1.
    fn probabilities_are_bounded() {
        for &l0 in &[-3.0, 0.0, 2.5] {
            for &l1 in &[-1.0, 0.7, 4.0] {
                for &nu in &[-2.0, 0.0, 1.5] {
                    let p = DavidsonProbs::new(l0, l1, nu);
                    assert!(p.p_draw > 0.0 && p.p_draw < 1.0);
                    assert!(p.p_1win > 0.0 && p.p_1win < 1.0);
                    assert!(p.p_draw + p.p_1win <= 1.0);
                    assert!((p.p_draw + p.p_1win + p.p_0win() - 1.0).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The analytic term gradient agrees with central differences for all
    // three outcome branches.
    //
    // Given
    // -----
    // - `lambda0 = 0.3`, `lambda1 = -0.4`, `nu = 0.2`.
    //
    // Expect
    // ------
    // - Agreement within 1e-6 for tie, `y = 1`, and `y = 0`.
    fn log_term_grad_matches_finite_differences() {
        let (l0, l1, nu) = (0.3, -0.4, 0.2);
        let probs = DavidsonProbs::new(l0, l1, nu);
        for &(tie, y) in &[(1u8, 0u8), (0, 1), (0, 0)] {
            let got = probs.log_term_grad(tie, y);
            let want = fd_term_grad(l0, l1, nu, tie, y);
            assert!((got.0 - want.0).abs() < 1e-6, "tie={tie} y={y}");
            assert!((got.1 - want.1).abs() < 1e-6, "tie={tie} y={y}");
            assert!((got.2 - want.2).abs() < 1e-6, "tie={tie} y={y}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Bradley–Terry win probability limits.
    //
    // Given
    // -----
    // - Equal strengths, and a player 0 whose `exp` underflows to zero.
    //
    // Expect
    // ------
    // - `0.5` and exactly `1.0`.
    fn bt_win_prob_limits() {
        assert_eq!(bt_win_prob(0.3, 0.3), 0.5);
        assert_eq!(bt_win_prob(-1000.0, 0.0), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Overflow is not clamped.
    //
    // Given
    // -----
    // - `lambda1 = 1000` so that `exp` overflows.
    //
    // Expect
    // ------
    // - `p_1win` is NaN (`inf / inf`).
    fn overflow_propagates() {
        let p = DavidsonProbs::new(0.0, 1000.0, 0.0);
        assert!(p.p_1win.is_nan());
    }
}
