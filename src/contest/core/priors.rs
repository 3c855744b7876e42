//! Normal priors of the Davidson model.
//!
//! Purpose
//! -------
//! Hold the four prior hyperparameters and evaluate the prior part of the
//! log density: an independent `Normal(prior_lambda_mu, prior_lambda_std)`
//! on every entry of `B` and `Normal(prior_nu_mu, prior_nu_std)` on `nu`.
//!
//! Key behaviors
//! -------------
//! - Construction rejects negative/NaN scales and non-finite locations.
//! - A scale of exactly zero or `+inf` survives construction; evaluating the
//!   density or its gradient with it is a domain error tagged with the
//!   prior's [`EvalSite`].
//! - Densities are fully normalized (`statrs` `ln_pdf`), constants included.
//!
//! Conventions
//! -----------
//! - [`DavidsonPriors::default`] is the standard normal on both blocks.
use crate::contest::{
    core::{
        site::EvalSite,
        validation::{validate_prior_location, validate_prior_scale},
    },
    errors::{ContestError, ContestResult},
};
use ndarray::{ArrayView1, ArrayViewMut1};
use statrs::distribution::{Continuous, Normal};

/// Prior hyperparameters of the Davidson model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DavidsonPriors {
    pub lambda_mu: f64,
    pub lambda_std: f64,
    pub nu_mu: f64,
    pub nu_std: f64,
}

impl DavidsonPriors {
    /// Validate and store prior hyperparameters.
    ///
    /// # Errors
    /// - `NegativePriorScale` if a scale is negative or NaN.
    /// - `InvalidPriorLocation` if a location is not finite.
    ///
    /// # Examples
    /// ```
    /// use rust_bpc::contest::core::priors::DavidsonPriors;
    /// assert!(DavidsonPriors::new(0.0, 1.0, 0.0, -1.0).is_err());
    /// ```
    pub fn new(lambda_mu: f64, lambda_std: f64, nu_mu: f64, nu_std: f64) -> ContestResult<Self> {
        Ok(DavidsonPriors {
            lambda_mu: validate_prior_location("prior_lambda_mu", lambda_mu)?,
            lambda_std: validate_prior_scale("prior_lambda_std", lambda_std)?,
            nu_mu: validate_prior_location("prior_nu_mu", nu_mu)?,
            nu_std: validate_prior_scale("prior_nu_std", nu_std)?,
        })
    }

    /// Log prior density of `(B, nu)`.
    ///
    /// # Errors
    /// - `InvalidPriorScale` at [`EvalSite::PriorB`] / [`EvalSite::PriorNu`]
    ///   when the corresponding scale is zero or infinite.
    pub fn log_prior(&self, b: ArrayView1<f64>, nu: f64) -> ContestResult<f64> {
        let lambda_prior = normal(self.lambda_mu, self.lambda_std, EvalSite::PriorB)?;
        let nu_prior = normal(self.nu_mu, self.nu_std, EvalSite::PriorNu)?;
        let b_term: f64 = b.iter().map(|&bj| lambda_prior.ln_pdf(bj)).sum();
        Ok(b_term + nu_prior.ln_pdf(nu))
    }

    /// Add the prior gradient `-(x - mu) / std²` into `grad_b` and `grad_nu`.
    ///
    /// # Errors
    /// - The same scale errors as [`DavidsonPriors::log_prior`].
    pub fn add_log_prior_grad(
        &self, b: ArrayView1<f64>, nu: f64, mut grad_b: ArrayViewMut1<f64>, grad_nu: &mut f64,
    ) -> ContestResult<()> {
        check_scale(self.lambda_std, EvalSite::PriorB)?;
        check_scale(self.nu_std, EvalSite::PriorNu)?;
        let lambda_var = self.lambda_std * self.lambda_std;
        grad_b.zip_mut_with(&b, |g, &bj| *g -= (bj - self.lambda_mu) / lambda_var);
        *grad_nu -= (nu - self.nu_mu) / (self.nu_std * self.nu_std);
        Ok(())
    }
}

impl Default for DavidsonPriors {
    fn default() -> Self {
        DavidsonPriors { lambda_mu: 0.0, lambda_std: 1.0, nu_mu: 0.0, nu_std: 1.0 }
    }
}

// ---- Helper methods ----

fn check_scale(std: f64, site: EvalSite) -> ContestResult<()> {
    if !(std > 0.0 && std.is_finite()) {
        return Err(ContestError::InvalidPriorScale { site, value: std });
    }
    Ok(())
}

fn normal(mu: f64, std: f64, site: EvalSite) -> ContestResult<Normal> {
    check_scale(std, site)?;
    Normal::new(mu, std).map_err(|_| ContestError::InvalidPriorScale { site, value: std })
}
