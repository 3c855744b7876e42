//! mode_finder::types — numeric aliases and L-BFGS solver wiring.
//!
//! Every other file in `mode_finder` names parameter vectors, gradients,
//! Hessians, and solvers through these aliases so the `ndarray`/`argmin`
//! generics appear in one place only.
//!
//! - [`Theta`] / [`Grad`]: column vectors of length `num_params_r`.
//! - [`Hessian`]: dense `n × n` matrix.
//! - [`Cost`]: scalar objective; the solver sees `-log p(θ)`.
//! - [`LbfgsHagerZhang`] / [`LbfgsMoreThuente`]: L-BFGS with a fixed line search.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector.
pub type Theta = Array1<f64>;

/// Gradient with the shape of [`Theta`].
pub type Grad = Array1<f64>;

/// Dense second-derivative matrix.
pub type Hessian = Array2<f64>;

/// Scalar objective handed to the solver.
pub type Cost = f64;

/// Solver function-evaluation counters keyed by argmin's names
/// (`"cost_count"`, `"gradient_count"`, ...).
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length used when none is configured.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
