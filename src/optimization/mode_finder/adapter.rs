//! Bridge from a [`LogDensity`] to argmin's `CostFunction` and `Gradient`.
//!
//! argmin minimizes, so the adapter exposes `c(θ) = -log p(θ)` and negates
//! analytic gradients. When the density has no analytic gradient, the cost
//! itself is differentiated numerically and needs no sign flip.
use crate::optimization::{
    errors::OptError,
    mode_finder::{
        finite_diff::run_fd_diff,
        traits::LogDensity,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;
use std::cell::RefCell;

#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogDensity> {
    pub f: &'a F,
}

impl<'a, F: LogDensity> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }

    /// Numerical gradient of the cost: central differences, then forward
    /// differences if any evaluation failed or produced a non-finite entry.
    fn numerical_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let slot: RefCell<Option<Error>> = RefCell::new(None);
        let cost = |t: &Theta| -> f64 {
            self.cost(t).unwrap_or_else(|e| {
                slot.borrow_mut().get_or_insert(e);
                f64::NAN
            })
        };
        let central = theta.central_diff(&cost);
        if slot.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
            return Ok(central);
        }
        Ok(run_fd_diff(theta, &cost, &slot)?)
    }
}

impl<F: LogDensity> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Theta) -> Result<Cost, Error> {
        let value = self.f.value(theta)?;
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value }.into());
        }
        Ok(-value)
    }
}

impl<F: LogDensity> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        match self.f.grad(theta) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => self.numerical_gradient(theta),
            Err(e) => Err(e.into()),
        }
    }
}
