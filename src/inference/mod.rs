//! inference — uncertainty at a posterior mode.
//!
//! Purpose
//! -------
//! Approximate the posterior around a mode found by
//! [`crate::optimization::mode_finder::maximize`] with a normal distribution
//! whose covariance is the pseudo-inverse of the negative Hessian.
//!
//! Conventions
//! -----------
//! - Parameters live in the unconstrained space of the model's transform.
//! - Failures are [`crate::optimization::errors::OptError`] values.

pub mod laplace;

pub use self::laplace::{EIGEN_EPS, LaplaceApprox};

pub mod prelude {
    pub use super::laplace::LaplaceApprox;
}
