//! Davidson generalized model: log density, analytic gradient, generated
//! quantities, and posterior-mode search.
//!
//! Purpose
//! -------
//! Evaluate
//!
//! ```text
//! log p(B, nu | data) = Σ_j log N(B_j | lambda_mu, lambda_std)
//!                     + log N(nu | nu_mu, nu_std)
//!                     + Σ_i term_i(B, nu)
//! ```
//!
//! where `term_i` is `ln p_draw` for a tied contest and
//! `ln Bernoulli(y_i | p_1win)` otherwise (see [`DavidsonProbs`]).
//!
//! Key behaviors
//! -------------
//! - [`DavidsonModel`] implements [`ContestModel`] for external samplers and
//!   [`LogDensity`] for [`crate::optimization::mode_finder::maximize`].
//! - The gradient with respect to `(B, nu)` is analytic.
//! - Generated quantities are the per-contest terms (`log_lik`) and every
//!   player's strength (`lambda`).
//!
//! Invariants & assumptions
//! ------------------------
//! - The model holds validated, immutable data; every method takes `&self`
//!   and allocates only its outputs.
//! - Priors are evaluated before contests, contests in input order; the
//!   first failure is returned with its [`EvalSite`].
//! - A non-tie contest with `y = 2` is a domain error at evaluation time.
//!
//! Testing notes
//! -------------
//! - Unit tests check a hand-computed single contest, the analytic gradient
//!   against finite differences, the name surface, and a full mode search.
use crate::{
    contest::{
        core::{
            context::VarContext,
            data::DavidsonData,
            outcome::DavidsonProbs,
            params::DavidsonParams,
            site::EvalSite,
            strength::{all_strengths, pair_strengths},
            transform::{DavidsonTransform, ParamTransform},
            validation::validate_theta,
        },
        errors::{ContestError, ContestResult},
        models::traits::ContestModel,
    },
    inference::LaplaceApprox,
    optimization::{
        errors::OptResult,
        mode_finder::{Grad, LogDensity, MLEOptions, OptimOutcome, Theta, maximize},
    },
};
use ndarray::{Array1, ArrayView1, s};
use rand::Rng;

/// Generated quantities of the Davidson model.
#[derive(Debug, Clone, PartialEq)]
pub struct DavidsonQuantities {
    /// Log-likelihood term of every contest, length `N_total`.
    pub log_lik: Array1<f64>,
    /// Strength of every player, length `N_players`.
    pub lambda: Array1<f64>,
}

/// Davidson generalized pairwise-contest model with ties.
#[derive(Debug, Clone, PartialEq)]
pub struct DavidsonModel {
    data: DavidsonData,
    transform: DavidsonTransform,
}

impl DavidsonModel {
    pub fn new(data: DavidsonData) -> Self {
        let transform = DavidsonTransform { k: data.shape().k };
        DavidsonModel { data, transform }
    }

    /// Build the data by name; see [`DavidsonData::from_context`].
    pub fn from_context(ctx: &VarContext) -> ContestResult<Self> {
        Ok(Self::new(DavidsonData::from_context(ctx)?))
    }

    pub fn data(&self) -> &DavidsonData {
        &self.data
    }

    /// Log density at named parameters.
    ///
    /// # Errors
    /// - `CoefficientLengthMismatch` if `B` does not have `K` entries.
    /// - `InvalidPriorScale` for a zero or infinite prior scale.
    /// - `PlayerIndexOutOfRange` / `OutcomeOutsideSupport` at the first
    ///   offending contest.
    pub fn log_density_at(&self, params: &DavidsonParams) -> ContestResult<f64> {
        self.transform.unconstrain(params)?;
        let mut total = self.data.priors().log_prior(params.b.view(), params.nu)?;
        self.walk_contests(params, |_, probs, tie, y| {
            total += probs.log_term(tie, y);
            Ok(())
        })?;
        Ok(total)
    }

    /// Gradient of [`ContestModel::log_density`] with respect to the
    /// unconstrained vector `[B_1, ..., B_K, nu]`.
    pub fn log_density_grad(&self, theta: ArrayView1<f64>) -> ContestResult<Array1<f64>> {
        let params = self.transform.constrain(theta)?;
        let k = self.transform.k;
        let features = self.data.index().features();
        let pairs = self.data.index().pairs();

        let mut grad = Array1::<f64>::zeros(k + 1);
        let mut grad_nu = 0.0;
        self.data.priors().add_log_prior_grad(
            params.b.view(),
            params.nu,
            grad.slice_mut(s![..k]),
            &mut grad_nu,
        )?;
        self.walk_contests(&params, |i, probs, tie, y| {
            let (d_lambda0, d_lambda1, d_nu) = probs.log_term_grad(tie, y);
            let (p0, p1) = pairs.pair(i);
            let site = EvalSite::Observation { i: i + 1 };
            let mut grad_b = grad.slice_mut(s![..k]);
            grad_b.scaled_add(d_lambda0, &features.feature_row(p0, site)?);
            grad_b.scaled_add(d_lambda1, &features.feature_row(p1, site)?);
            grad_nu += d_nu;
            Ok(())
        })?;
        grad[k] = grad_nu;
        Ok(grad)
    }

    /// Per-contest log-likelihood terms and per-player strengths.
    pub fn generated_quantities(&self, params: &DavidsonParams) -> ContestResult<DavidsonQuantities> {
        self.transform.unconstrain(params)?;
        let mut log_lik = Array1::<f64>::zeros(self.data.shape().n_obs);
        self.walk_contests(params, |i, probs, tie, y| {
            log_lik[i] = probs.log_term(tie, y);
            Ok(())
        })?;
        let lambda = all_strengths(self.data.index().features(), params.b.view())?;
        Ok(DavidsonQuantities { log_lik, lambda })
    }

    /// Maximize the log density with L-BFGS from `theta0`.
    ///
    /// # Errors
    /// - [`crate::optimization::errors::OptError::Model`] wrapping any
    ///   evaluation error.
    /// - Solver and configuration errors from the mode finder.
    pub fn posterior_mode(&self, theta0: Theta, opts: &MLEOptions) -> OptResult<OptimOutcome> {
        maximize(self, theta0, opts)
    }

    /// Normal approximation at `mode` from the Hessian of the analytic
    /// gradient.
    pub fn laplace(&self, mode: &Theta) -> OptResult<LaplaceApprox> {
        LaplaceApprox::from_fallible_gradient(&|t: &Theta| self.grad(t), mode)
    }

    /// Visit every contest in order with its probabilities.
    ///
    /// `step(i, probs, tie, y)` receives the 0-based contest index. Index
    /// and outcome errors carry `EvalSite::Observation { i: i + 1 }`.
    fn walk_contests<Step>(&self, params: &DavidsonParams, mut step: Step) -> ContestResult<()>
    where
        Step: FnMut(usize, DavidsonProbs, u8, u8) -> ContestResult<()>,
    {
        let index = self.data.index();
        let outcomes = self.data.y().iter().zip(self.data.ties());
        for (i, (&y, &tie)) in outcomes.enumerate() {
            let site = EvalSite::Observation { i: i + 1 };
            if tie == 0 && y > 1 {
                return Err(ContestError::OutcomeOutsideSupport { site, value: y });
            }
            let (lambda0, lambda1) = pair_strengths(index, i, params.b.view(), site)?;
            step(i, DavidsonProbs::new(lambda0, lambda1, params.nu), tie, y)?;
        }
        Ok(())
    }
}

impl ContestModel for DavidsonModel {
    type Transform = DavidsonTransform;

    const PARAM_BLOCKS: usize = 2;

    fn model_name(&self) -> &'static str {
        "davidson_generalized"
    }

    fn transform(&self) -> &DavidsonTransform {
        &self.transform
    }

    fn log_density(&self, theta: ArrayView1<f64>) -> ContestResult<f64> {
        let params = self.transform.constrain(theta)?;
        Ok(self.log_density_at(&params)? + self.transform.log_jacobian(theta))
    }

    fn param_names(&self) -> Vec<&'static str> {
        vec!["B", "nu", "log_lik", "lambda"]
    }

    fn param_dims(&self) -> Vec<Vec<usize>> {
        let shape = self.data.shape();
        vec![vec![shape.k], vec![], vec![shape.n_obs], vec![shape.n_players]]
    }

    fn write_array<R: Rng + ?Sized>(
        &self, theta: ArrayView1<f64>, include_gqs: bool, _rng: &mut R,
    ) -> ContestResult<Array1<f64>> {
        let params = self.transform.constrain(theta)?;
        let mut out: Vec<f64> = params.b.to_vec();
        out.push(params.nu);
        if include_gqs {
            let gq = self.generated_quantities(&params)?;
            out.extend(gq.log_lik.iter());
            out.extend(gq.lambda.iter());
        }
        Ok(Array1::from(out))
    }
}

impl LogDensity for DavidsonModel {
    fn value(&self, theta: &Theta) -> OptResult<f64> {
        Ok(self.log_density(theta.view())?)
    }

    fn check(&self, theta: &Theta) -> OptResult<()> {
        validate_theta(theta.view(), self.num_params_r())?;
        Ok(())
    }

    fn grad(&self, theta: &Theta) -> OptResult<Grad> {
        Ok(self.log_density_grad(theta.view())?)
    }
}
