//! The capability shared by both contest models.
//!
//! [`ContestModel`] is what an external sampler or a binding layer needs:
//! the unconstrained log density, the parameter name surface, and a flat
//! `write_array` of parameters plus generated quantities. The two models
//! implement it independently.
use crate::{
    contest::{
        core::{context::VarContext, params::flat_names, transform::ParamTransform},
        errors::ContestResult,
    },
    optimization::mode_finder::Theta,
};
use ndarray::{Array1, ArrayView1};
use rand::Rng;

pub trait ContestModel {
    type Transform: ParamTransform;

    /// Number of leading entries of [`ContestModel::param_names`] that are
    /// parameters; the rest are generated quantities.
    const PARAM_BLOCKS: usize;

    fn model_name(&self) -> &'static str;

    fn transform(&self) -> &Self::Transform;

    /// Log density at an unconstrained vector, Jacobian included.
    fn log_density(&self, theta: ArrayView1<f64>) -> ContestResult<f64>;

    /// Block names in output order, parameters first.
    fn param_names(&self) -> Vec<&'static str>;

    /// Dims of each block, aligned with [`ContestModel::param_names`].
    fn param_dims(&self) -> Vec<Vec<usize>>;

    /// Constrained parameters, optionally followed by generated quantities,
    /// flattened in the order of [`ContestModel::constrained_param_names`].
    fn write_array<R: Rng + ?Sized>(
        &self, theta: ArrayView1<f64>, include_gqs: bool, rng: &mut R,
    ) -> ContestResult<Array1<f64>>;

    fn num_params_r(&self) -> usize {
        self.transform().num_params_r()
    }

    fn unconstrained_param_names(&self) -> Vec<String> {
        self.transform().unconstrained_param_names()
    }

    fn transform_inits(&self, ctx: &VarContext) -> ContestResult<Theta> {
        self.transform().transform_inits(ctx)
    }

    /// Flat names (`B.1`, ..., `nu`, `log_lik.1`, ...).
    fn constrained_param_names(&self, include_gqs: bool) -> Vec<String> {
        let blocks = if include_gqs { usize::MAX } else { Self::PARAM_BLOCKS };
        self.param_names()
            .into_iter()
            .zip(self.param_dims())
            .take(blocks)
            .flat_map(|(name, dims)| flat_names(name, &dims))
            .collect()
    }
}
