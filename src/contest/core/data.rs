//! Data containers for the Davidson and prediction models.
//!
//! Purpose
//! -------
//! Provide validated, immutable containers for contest data, built either
//! from typed Rust inputs or by name from a [`VarContext`].
//!
//! Key behaviors
//! -------------
//! - [`DavidsonData`] holds the feature index, outcomes `y`, tie flags, and
//!   priors.
//! - [`PredictData`] holds the feature index of the new pairs.
//! - `from_context` reads the variables in declaration order and checks
//!   each one's dims against the sizes read before it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Sizes are at least 1; player indexes are at least 1.
//! - `y ∈ {0, 1, 2}` and `ties ∈ {0, 1}` element-wise. An outcome of 2 on a
//!   non-tie contest is accepted here and rejected when the likelihood is
//!   evaluated.
//! - Prior scales are non-negative and prior locations finite.
//!
//! Downstream usage
//! ----------------
//! - Models take ownership of one of these containers; they are `Send + Sync`
//!   and can be shared read-only across threads.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the typed constructors and named construction,
//!   including missing variables and dims mismatches.
use crate::contest::{
    core::{
        context::VarContext, features::FeatureIndex, priors::DavidsonPriors, shape::ContestShape,
        validation::{validate_count, validate_indicators},
    },
    errors::ContestResult,
};

/// Largest accepted outcome code.
pub const MAX_OUTCOME: i64 = 2;

/// Validated data of the Davidson model.
#[derive(Debug, Clone, PartialEq)]
pub struct DavidsonData {
    index: FeatureIndex,
    y: Vec<u8>,
    ties: Vec<u8>,
    priors: DavidsonPriors,
}

impl DavidsonData {
    /// Build from typed inputs.
    ///
    /// # Parameters
    /// - `shape`: `N_total`, `N_players`, `K`.
    /// - `x_column_major`: `N_players × K` features, column-major.
    /// - `player0` / `player1`: 1-based indexes, length `N_total`.
    /// - `y`: outcomes in `0..=2`, length `N_total`.
    /// - `ties`: tie flags in `{0, 1}`, length `N_total`.
    ///
    /// # Errors
    /// - Configuration errors naming the offending field.
    pub fn new(
        shape: ContestShape, x_column_major: &[f64], player0: &[i64], player1: &[i64], y: &[i64],
        ties: &[i64], priors: DavidsonPriors,
    ) -> ContestResult<Self> {
        let y = validate_indicators("y", y, shape.n_obs, MAX_OUTCOME)?;
        let index = FeatureIndex::new(shape, x_column_major, player0, player1)?;
        let ties = validate_indicators("ties", ties, shape.n_obs, 1)?;
        Ok(DavidsonData { index, y, ties, priors })
    }

    /// Build from an already-validated index.
    pub fn from_index(
        index: FeatureIndex, y: &[i64], ties: &[i64], priors: DavidsonPriors,
    ) -> ContestResult<Self> {
        let n_obs = index.shape().n_obs;
        let y = validate_indicators("y", y, n_obs, MAX_OUTCOME)?;
        let ties = validate_indicators("ties", ties, n_obs, 1)?;
        Ok(DavidsonData { index, y, ties, priors })
    }

    /// Build by name: `N_total`, `y`, `N_players`, `player0_indexes`,
    /// `player1_indexes`, `ties`, `K`, `X`, `prior_lambda_mu`,
    /// `prior_lambda_std`, `prior_nu_mu`, `prior_nu_std`.
    ///
    /// Variables are read in that order, so the first absent, misshaped, or
    /// non-positive size is the one reported.
    ///
    /// # Errors
    /// - `MissingVariable` / `DimsMismatch` for absent or misshaped variables.
    /// - `InvalidCount` for a size below 1.
    /// - The same errors as [`DavidsonData::new`] for invalid values.
    pub fn from_context(ctx: &VarContext) -> ContestResult<Self> {
        let n_obs = validate_count("N_total", ctx.int_scalar("N_total")?)?;
        let n = [n_obs];
        let y = ctx.ints("y", &n)?;
        let n_players = validate_count("N_players", ctx.int_scalar("N_players")?)?;
        let player0 = ctx.ints("player0_indexes", &n)?;
        let player1 = ctx.ints("player1_indexes", &n)?;
        let ties = ctx.ints("ties", &n)?;
        let k = validate_count("K", ctx.int_scalar("K")?)?;
        let x = ctx.reals("X", &[n_players, k])?;
        let shape = ContestShape { n_obs, n_players, k };
        let priors = DavidsonPriors::new(
            ctx.real_scalar("prior_lambda_mu")?,
            ctx.real_scalar("prior_lambda_std")?,
            ctx.real_scalar("prior_nu_mu")?,
            ctx.real_scalar("prior_nu_std")?,
        )?;
        Self::new(shape, &x, player0, player1, y, ties, priors)
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    pub fn shape(&self) -> &ContestShape {
        self.index.shape()
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }

    pub fn ties(&self) -> &[u8] {
        &self.ties
    }

    pub fn priors(&self) -> &DavidsonPriors {
        &self.priors
    }
}

/// Validated data of the prediction model.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictData {
    index: FeatureIndex,
}

impl PredictData {
    /// Build from typed inputs (`N_newdata`, `N_players`, `K`, indexes, `X`).
    pub fn new(
        shape: ContestShape, x_column_major: &[f64], player0: &[i64], player1: &[i64],
    ) -> ContestResult<Self> {
        Ok(PredictData { index: FeatureIndex::new(shape, x_column_major, player0, player1)? })
    }

    pub fn from_index(index: FeatureIndex) -> Self {
        PredictData { index }
    }

    /// Build by name, in this order: `N_newdata`, `N_players`,
    /// `player0_indexes`, `player1_indexes`, `K`, `X`.
    pub fn from_context(ctx: &VarContext) -> ContestResult<Self> {
        let n_obs = validate_count("N_newdata", ctx.int_scalar("N_newdata")?)?;
        let n = [n_obs];
        let n_players = validate_count("N_players", ctx.int_scalar("N_players")?)?;
        let player0 = ctx.ints("player0_indexes", &n)?;
        let player1 = ctx.ints("player1_indexes", &n)?;
        let k = validate_count("K", ctx.int_scalar("K")?)?;
        let x = ctx.reals("X", &[n_players, k])?;
        let shape = ContestShape { n_obs, n_players, k };
        Self::new(shape, &x, player0, player1)
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    pub fn shape(&self) -> &ContestShape {
        self.index.shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::errors::ContestError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Typed construction and indicator checks.
    // - Named construction, including a missing prior and a misshaped `X`.
    // - Read order of named variables.
    // -------------------------------------------------------------------------

    fn davidson_context() -> VarContext {
        VarContext::new()
            .with_int("N_total", &[], vec![2])
            .and_then(|c| c.with_int("y", &[2], vec![1, 0]))
            .and_then(|c| c.with_int("N_players", &[], vec![3]))
            .and_then(|c| c.with_int("player0_indexes", &[2], vec![1, 2]))
            .and_then(|c| c.with_int("player1_indexes", &[2], vec![2, 3]))
            .and_then(|c| c.with_int("ties", &[2], vec![0, 1]))
            .and_then(|c| c.with_int("K", &[], vec![1]))
            .and_then(|c| c.with_real("X", &[3, 1], vec![1.0, 2.0, 3.0]))
            .and_then(|c| c.with_real("prior_lambda_mu", &[], vec![0.0]))
            .and_then(|c| c.with_real("prior_lambda_std", &[], vec![1.0]))
            .and_then(|c| c.with_real("prior_nu_mu", &[], vec![0.0]))
            .and_then(|c| c.with_real("prior_nu_std", &[], vec![1.0]))
            .expect("fixture context should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Named construction reads every variable.
    //
    // Given
    // -----
    // - A complete context with two contests and three players.
    //
    // Expect
    // ------
    // - Sizes, outcomes, ties, and pairs match the context.
    fn from_context_reads_all_variables() {
        let data = DavidsonData::from_context(&davidson_context()).unwrap();
        assert_eq!(*data.shape(), ContestShape { n_obs: 2, n_players: 3, k: 1 });
        assert_eq!(data.y(), &[1, 0]);
        assert_eq!(data.ties(), &[0, 1]);
        assert_eq!(data.index().pairs().pair(1), (2, 3));
        assert_eq!(*data.priors(), DavidsonPriors::default());
    }

    #[test]
    // Purpose
    // -------
    // Missing or misshaped variables are configuration errors naming the variable.
    //
    // Given
    // -----
    // - The fixture context with `X` declared `[1, 3]` instead of `[3, 1]`.
    //
    // Expect
    // ------
    // - `DimsMismatch` for `X`.
    fn from_context_checks_dims() {
        let ctx = davidson_context().with_real("X", &[1, 3], vec![1.0, 2.0, 3.0]).unwrap();
        let err = DavidsonData::from_context(&ctx).unwrap_err();
        assert!(matches!(err, ContestError::DimsMismatch { ref name, .. } if name == "X"));
    }

    #[test]
    // Purpose
    // -------
    // `y` is read right after `N_total`, so its shape error wins over any
    // problem in the variables declared after it.
    //
    // Given
    // -----
    // - The fixture context with `y` declared `[3]` against `N_total = 2`.
    // - `N_players = 0` and `K` removed.
    //
    // Expect
    // ------
    // - `DimsMismatch` for `y`; fixing `y` surfaces `InvalidCount` for
    //   `N_players`, then fixing that surfaces `MissingVariable` for `K`.
    fn from_context_reports_errors_in_declaration_order() {
        let base = VarContext::new()
            .with_int("N_total", &[], vec![2])
            .and_then(|c| c.with_int("N_players", &[], vec![0]))
            .and_then(|c| c.with_int("player0_indexes", &[2], vec![1, 2]))
            .and_then(|c| c.with_int("player1_indexes", &[2], vec![2, 3]))
            .and_then(|c| c.with_int("ties", &[2], vec![0, 1]))
            .and_then(|c| c.with_real("X", &[3, 1], vec![1.0, 2.0, 3.0]))
            .unwrap();

        let ctx = base.clone().with_int("y", &[3], vec![1, 0, 2]).unwrap();
        assert_eq!(
            DavidsonData::from_context(&ctx).unwrap_err(),
            ContestError::DimsMismatch { name: "y".to_string(), expected: vec![2], found: vec![3] }
        );

        let ctx = base.with_int("y", &[2], vec![1, 0]).unwrap();
        assert_eq!(
            DavidsonData::from_context(&ctx).unwrap_err(),
            ContestError::InvalidCount { field: "N_players", value: 0 }
        );

        let ctx = ctx.with_int("N_players", &[], vec![3]).unwrap();
        assert_eq!(
            DavidsonData::from_context(&ctx).unwrap_err(),
            ContestError::MissingVariable { name: "K".to_string() }
        );
    }

    #[test]
    // Purpose
    // -------
    // An outcome code of 3 is outside the accepted range.
    //
    // Given
    // -----
    // - `y = [3]`.
    //
    // Expect
    // ------
    // - `InvalidIndicator` naming `y`.
    fn outcome_above_two_is_rejected() {
        let shape = ContestShape::davidson(1, 2, 1).unwrap();
        let err = DavidsonData::new(shape, &[1.0, 2.0], &[1], &[2], &[3], &[0], DavidsonPriors::default())
            .unwrap_err();
        assert!(matches!(err, ContestError::InvalidIndicator { field: "y", .. }));
    }

    #[test]
    // Purpose
    // -------
    // Prediction data by name.
    //
    // Given
    // -----
    // - `N_newdata = 1`, two players, `K = 1`.
    //
    // Expect
    // ------
    // - The shape uses `n_obs = 1`.
    fn predict_from_context() {
        let ctx = VarContext::new()
            .with_int("N_newdata", &[], vec![1])
            .and_then(|c| c.with_int("N_players", &[], vec![2]))
            .and_then(|c| c.with_int("player0_indexes", &[1], vec![1]))
            .and_then(|c| c.with_int("player1_indexes", &[1], vec![2]))
            .and_then(|c| c.with_int("K", &[], vec![1]))
            .and_then(|c| c.with_real("X", &[2, 1], vec![0.0, 1.0]))
            .unwrap();
        let data = PredictData::from_context(&ctx).unwrap();
        assert_eq!(data.shape().n_obs, 1);
    }
}
