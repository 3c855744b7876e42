//! Parameter transforms between the flat unconstrained vector and named
//! model parameters.
//!
//! Purpose
//! -------
//! Define the [`ParamTransform`] capability and its two implementations. Both
//! models use the identity map with zero log-Jacobian: the unconstrained
//! vector is `[B_1, ..., B_K, nu]` for the Davidson model and
//! `[B_1, ..., B_K]` for prediction.
//!
//! Key behaviors
//! -------------
//! - `constrain` checks the vector length and copies entries out.
//! - `unconstrain` checks `B` has length `K` and copies entries in, so
//!   `unconstrain(constrain(v)) == v` bit for bit.
//! - `transform_inits` reads `B` (dims `[K]`) and, for Davidson, `nu`
//!   (dims `[]`) from a [`VarContext`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Transforms are pure and hold only `K`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover length errors and named initial values; a property
//!   test in `tests/` covers the round trip.
use crate::{
    contest::{
        core::{
            context::VarContext,
            params::{DavidsonParams, PredictParams, flat_names},
            strength::check_coefficients,
        },
        errors::{ContestResult, ParamError},
    },
    optimization::mode_finder::Theta,
};
use ndarray::{Array1, ArrayView1, s};

/// Mapping between the unconstrained vector and named parameters.
pub trait ParamTransform {
    type Params;

    /// Number of unconstrained parameters.
    fn num_params_r(&self) -> usize;

    /// Unconstrained → named parameters.
    fn constrain(&self, theta: ArrayView1<f64>) -> ContestResult<Self::Params>;

    /// Named parameters → unconstrained.
    fn unconstrain(&self, params: &Self::Params) -> ContestResult<Theta>;

    /// Unconstrained vector from named initial values.
    fn transform_inits(&self, ctx: &VarContext) -> ContestResult<Theta>;

    /// Flat unconstrained names (`B.1`, ..., `nu`).
    fn unconstrained_param_names(&self) -> Vec<String>;

    /// Log absolute Jacobian determinant of `constrain` at `theta`.
    fn log_jacobian(&self, _theta: ArrayView1<f64>) -> f64 {
        0.0
    }

    /// Length check shared by `constrain` implementations.
    fn check_len(&self, theta: ArrayView1<f64>) -> ContestResult<()> {
        let expected = self.num_params_r();
        if theta.len() != expected {
            return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() }.into());
        }
        Ok(())
    }
}

/// Identity transform over `(B, nu)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DavidsonTransform {
    pub k: usize,
}

impl ParamTransform for DavidsonTransform {
    type Params = DavidsonParams;

    fn num_params_r(&self) -> usize {
        self.k + 1
    }

    fn constrain(&self, theta: ArrayView1<f64>) -> ContestResult<DavidsonParams> {
        self.check_len(theta)?;
        Ok(DavidsonParams { b: theta.slice(s![..self.k]).to_owned(), nu: theta[self.k] })
    }

    fn unconstrain(&self, params: &DavidsonParams) -> ContestResult<Theta> {
        check_coefficients(params.b.view(), self.k)?;
        let mut theta = Array1::zeros(self.k + 1);
        theta.slice_mut(s![..self.k]).assign(&params.b);
        theta[self.k] = params.nu;
        Ok(theta)
    }

    fn transform_inits(&self, ctx: &VarContext) -> ContestResult<Theta> {
        let b = Array1::from(ctx.reals("B", &[self.k])?);
        let nu = ctx.real_scalar("nu")?;
        self.unconstrain(&DavidsonParams { b, nu })
    }

    fn unconstrained_param_names(&self) -> Vec<String> {
        let mut names = flat_names("B", &[self.k]);
        names.push("nu".to_string());
        names
    }
}

/// Identity transform over `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictTransform {
    pub k: usize,
}

impl ParamTransform for PredictTransform {
    type Params = PredictParams;

    fn num_params_r(&self) -> usize {
        self.k
    }

    fn constrain(&self, theta: ArrayView1<f64>) -> ContestResult<PredictParams> {
        self.check_len(theta)?;
        Ok(PredictParams { b: theta.to_owned() })
    }

    fn unconstrain(&self, params: &PredictParams) -> ContestResult<Theta> {
        check_coefficients(params.b.view(), self.k)?;
        Ok(params.b.clone())
    }

    fn transform_inits(&self, ctx: &VarContext) -> ContestResult<Theta> {
        let b = Array1::from(ctx.reals("B", &[self.k])?);
        self.unconstrain(&PredictParams { b })
    }

    fn unconstrained_param_names(&self) -> Vec<String> {
        flat_names("B", &[self.k])
    }
}
