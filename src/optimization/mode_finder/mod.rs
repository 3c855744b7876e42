//! mode_finder — argmin-backed L-BFGS search for posterior modes.
//!
//! Purpose
//! -------
//! Maximize a log density `log p(θ)` over an unconstrained vector. Models
//! implement [`LogDensity`] and call [`maximize`].
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] presents `c(θ) = -log p(θ)` to argmin and
//!   falls back to finite differences when no analytic gradient exists.
//! - [`builders`] build L-BFGS with Hager–Zhang or More–Thuente line search.
//! - [`run::run_lbfgs`] drives the executor and validates the result into an
//!   [`OptimOutcome`].
//! - [`finite_diff`] also estimates Hessians for the Laplace approximation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models supply `log p` and `∇ log p`, never the cost.
//! - Model failures are [`crate::optimization::errors::OptError`] values;
//!   nothing here panics.
//!
//! Conventions
//! -----------
//! - [`OptimOutcome::value`] is a log density, not a cost.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; `api` solves toy quadratics and the
//!   contest models run full mode searches in their own tests.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogDensity, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogDensity, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Grad, Theta};
}
