//! Finite-difference fallbacks for gradients and Hessians.
//!
//! `finitediff` evaluates plain `Fn(&Theta) -> f64` closures, so fallible
//! objectives record their first error in a `RefCell` slot and return `NaN`.
//! [`run_fd_diff`] turns that slot back into an error after the sweep.
//! [`compute_hessian`] differentiates a gradient closure, trying central
//! differences before forward ones, and symmetrizes the result.
use crate::optimization::{
    errors::OptResult,
    mode_finder::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// Clears `closure_err` first; if `func` stored an error during the sweep,
/// that error is returned instead of the gradient.
///
/// # Errors
/// - The captured closure error, converted into [`crate::optimization::errors::OptError`].
/// - Any [`validate_grad`] failure.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&grad, theta.len())?;
    Ok(grad)
}

/// Hessian of the scalar whose gradient is `grad_fn`.
///
/// # Errors
/// - [`crate::optimization::errors::OptError::InvalidHessian`] if both
///   the central and the forward estimate contain non-finite entries.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(grad_fn: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(grad_fn);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(grad_fn);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

fn symmetrize_hess(hess: &mut Hessian) {
    let n = hess.nrows();
    for i in 1..n {
        for j in 0..i {
            let mean = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = mean;
            hess[[j, i]] = mean;
        }
    }
}
