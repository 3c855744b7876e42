//! inference::laplace — Gaussian approximation at a posterior mode.
//!
//! Purpose
//! -------
//! Turn a mode `θ̂` and the gradient of `log p` into a covariance matrix and
//! standard errors for the unconstrained parameters.
//!
//! Key behaviors
//! -------------
//! - Differentiate the gradient numerically ([`compute_hessian`]) to get
//!   `H = ∇² log p(θ̂)`, then work with the precision `P = -H`.
//! - Eigendecompose `P` with `nalgebra` and form the pseudo-inverse over
//!   eigenvalues above [`EIGEN_EPS`]; directions with flat or negative
//!   curvature contribute nothing.
//!
//! Invariants & assumptions
//! ------------------------
//! - `P` is symmetric (the Hessian is symmetrized upstream).
//! - At least one eigenvalue must exceed [`EIGEN_EPS`]; otherwise
//!   [`OptError::SingularHessian`] is returned.
//!
//! Conventions
//! -----------
//! - Everything is on the scale of the full log density (sum over
//!   observations plus priors), not an average.
//! - No explicit inverse is formed.
//!
//! Testing notes
//! -------------
//! - Unit tests use quadratic densities whose covariance is known in closed
//!   form, including a rank-deficient one.
use crate::optimization::{
    errors::{OptError, OptResult},
    mode_finder::{Grad, Hessian, Theta, finite_diff::compute_hessian},
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use std::cell::RefCell;

/// Eigenvalues of the precision at or below this are treated as zero.
pub const EIGEN_EPS: f64 = 1e-10;

/// Normal approximation `N(mode, covariance)` to a posterior.
#[derive(Debug, Clone, PartialEq)]
pub struct LaplaceApprox {
    pub mode: Theta,
    /// Pseudo-inverse of the negative Hessian at `mode`.
    pub covariance: Array2<f64>,
    /// Square roots of the diagonal of `covariance`.
    pub std_errors: Array1<f64>,
}

impl LaplaceApprox {
    /// Build the approximation from an infallible gradient of `log p`.
    ///
    /// # Errors
    /// - [`OptError::InvalidHessian`] if finite differences produce
    ///   non-finite entries.
    /// - [`OptError::SingularHessian`] if no curvature direction survives.
    pub fn from_gradient<F: Fn(&Theta) -> Grad>(grad: &F, mode: &Theta) -> OptResult<Self> {
        let hess = compute_hessian(grad, mode)?;
        let covariance = pseudo_inverse_precision(&hess)?;
        let std_errors = covariance.diag().mapv(f64::sqrt);
        Ok(Self { mode: mode.clone(), covariance, std_errors })
    }

    /// Same as [`LaplaceApprox::from_gradient`] for a gradient that can fail.
    /// The first failure aborts the Hessian sweep and is returned.
    pub fn from_fallible_gradient<F>(grad: &F, mode: &Theta) -> OptResult<Self>
    where
        F: Fn(&Theta) -> OptResult<Grad>,
    {
        let first_err: RefCell<Option<OptError>> = RefCell::new(None);
        let wrapped = |t: &Theta| match grad(t) {
            Ok(g) => g,
            Err(e) => {
                first_err.borrow_mut().get_or_insert(e);
                Array1::from_elem(t.len(), f64::NAN)
            }
        };
        let approx = Self::from_gradient(&wrapped, mode);
        match first_err.into_inner() {
            Some(err) => Err(err),
            None => approx,
        }
    }
}

/// `(-H)⁺` over eigenvalues above [`EIGEN_EPS`].
fn pseudo_inverse_precision(hess: &Hessian) -> OptResult<Array2<f64>> {
    let n = hess.nrows();
    let precision = DMatrix::<f64>::from_fn(n, n, |i, j| -hess[[i, j]]);
    let eigen = precision.symmetric_eigen();
    let kept: Vec<usize> = (0..n).filter(|&k| eigen.eigenvalues[k] > EIGEN_EPS).collect();
    if kept.is_empty() {
        return Err(OptError::SingularHessian { dim: n });
    }

    let q = &eigen.eigenvectors;
    let mut cov = Array2::<f64>::zeros((n, n));
    for &k in &kept {
        let inv_lambda = 1.0 / eigen.eigenvalues[k];
        for i in 0..n {
            for j in 0..=i {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] * inv_lambda;
            }
        }
    }
    for i in 0..n {
        for j in 0..i {
            cov[[j, i]] = cov[[i, j]];
        }
    }
    Ok(cov)
}
