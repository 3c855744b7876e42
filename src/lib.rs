//! rust_bpc — Davidson and Bradley–Terry pairwise contest models with
//! feature-driven player strengths, plus Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the contest models to Python via the `_rust_bpc` extension
//! module. Python items exist only with the `python-bindings` feature.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules: `contest` (data, transforms, models),
//!   `optimization` (L-BFGS posterior mode), and `inference` (Laplace
//!   approximation).
//! - Define `#[pyclass]` wrappers for [`DavidsonModel`] and
//!   [`BTPredictModel`] and register them under
//!   `rust_bpc.contest_models`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs FFI
//!   glue and error mapping only.
//! - Random draws are seeded per call from a caller-supplied `u64`, so the
//!   same seed reproduces the same `y_pred`.
//!
//! Conventions
//! -----------
//! - Player indexes are 1-based on both sides of the boundary.
//! - `X` is passed from Python as a 2-D `N_players × K` float64 array.
//! - Core errors are converted to `ValueError` through their
//!   `From<_> for PyErr` impls.
//!
//! Downstream usage
//! ----------------
//! - Rust code uses [`contest`] directly and ignores the PyO3 items.
//! - A pure-Python package imports `_rust_bpc` and wraps the classes.
//!
//! Testing notes
//! -------------
//! - Model behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`; the bindings are thin enough that they
//!   are exercised from Python only.

pub mod contest;
pub mod inference;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray2, PyUntypedArrayMethods};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand::{SeedableRng, rngs::StdRng};

#[cfg(feature = "python-bindings")]
use crate::{
    contest::{
        core::{
            ContestShape, DavidsonData, DavidsonPriors, FeatureIndex, ParamTransform, PredictData,
        },
        models::{BTPredictModel, ContestModel, DavidsonModel},
    },
    optimization::mode_finder::OptimOutcome,
    utils::{extract_f64_vec, extract_i64_vec, extract_mle_opts},
};

/// Validated contest index from Python inputs.
#[cfg(feature = "python-bindings")]
fn build_index<'py>(
    shape: ContestShape, x: PyReadonlyArray2<'py, f64>, player0: &Bound<'py, PyAny>,
    player1: &Bound<'py, PyAny>,
) -> PyResult<FeatureIndex> {
    let p0 = extract_i64_vec(player0, "player0_indexes")?;
    let p1 = extract_i64_vec(player1, "player1_indexes")?;
    let x_owned = x.as_array().to_owned();
    Ok(FeatureIndex::from_matrix(shape, x_owned, &p0, &p1)?)
}

/// DavidsonGeneralized — Python-facing Davidson contest model with ties.
///
/// Purpose
/// -------
/// Build a [`DavidsonModel`] from Python arrays and expose its log density,
/// gradient, generated quantities, posterior mode, and Laplace covariance.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `DavidsonGeneralized(y, player0_indexes, player1_indexes, ties, X, prior_lambda_mu=0.0,
/// prior_lambda_std=1.0, prior_nu_mu=0.0, prior_nu_std=1.0)`:
/// - `y`, `ties`: integer arrays of length `N_total`.
/// - `player0_indexes`, `player1_indexes`: 1-based integer arrays.
/// - `X`: `N_players × K` float64 array; `N_players` and `K` are its shape.
///
/// Invariants
/// ----------
/// - `inner` holds validated data; every method is a pure function of it
///   and its arguments.
///
/// Notes
/// -----
/// - This type is part of the Python FFI surface; Rust code should use
///   [`DavidsonModel`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_bpc.contest_models")]
pub struct DavidsonGeneralized {
    pub inner: DavidsonModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl DavidsonGeneralized {
    #[new]
    #[pyo3(
        signature = (
            y,
            player0_indexes,
            player1_indexes,
            ties,
            x,
            prior_lambda_mu = 0.0,
            prior_lambda_std = 1.0,
            prior_nu_mu = 0.0,
            prior_nu_std = 1.0,
        ),
        text_signature = "(y, player0_indexes, player1_indexes, ties, x, /, prior_lambda_mu=0.0, \
                          prior_lambda_std=1.0, prior_nu_mu=0.0, prior_nu_std=1.0)"
    )]
    pub fn new<'py>(
        y: &Bound<'py, PyAny>, player0_indexes: &Bound<'py, PyAny>,
        player1_indexes: &Bound<'py, PyAny>, ties: &Bound<'py, PyAny>,
        x: PyReadonlyArray2<'py, f64>, prior_lambda_mu: f64, prior_lambda_std: f64,
        prior_nu_mu: f64, prior_nu_std: f64,
    ) -> PyResult<Self> {
        let y_vec = extract_i64_vec(y, "y")?;
        let ties_vec = extract_i64_vec(ties, "ties")?;
        let (n_players, k) = (x.shape()[0], x.shape()[1]);
        let shape = ContestShape::davidson(y_vec.len() as i64, n_players as i64, k as i64)?;
        let index = build_index(shape, x, player0_indexes, player1_indexes)?;
        let priors =
            DavidsonPriors::new(prior_lambda_mu, prior_lambda_std, prior_nu_mu, prior_nu_std)?;
        let data = DavidsonData::from_index(index, &y_vec, &ties_vec, priors)?;
        Ok(DavidsonGeneralized { inner: DavidsonModel::new(data) })
    }

    #[getter]
    pub fn model_name(&self) -> &'static str {
        self.inner.model_name()
    }

    #[getter]
    pub fn num_params_r(&self) -> usize {
        self.inner.num_params_r()
    }

    pub fn unconstrained_param_names(&self) -> Vec<String> {
        self.inner.unconstrained_param_names()
    }

    #[pyo3(signature = (include_gqs = true), text_signature = "(self, /, include_gqs=True)")]
    pub fn constrained_param_names(&self, include_gqs: bool) -> Vec<String> {
        self.inner.constrained_param_names(include_gqs)
    }

    #[pyo3(text_signature = "(self, theta)")]
    pub fn log_density<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>) -> PyResult<f64> {
        let theta_vec = Array1::from(extract_f64_vec(py, theta, "theta")?);
        Ok(self.inner.log_density(theta_vec.view())?)
    }

    #[pyo3(text_signature = "(self, theta)")]
    pub fn log_density_grad<'py>(
        &self, py: Python<'py>, theta: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<f64>> {
        let theta_vec = Array1::from(extract_f64_vec(py, theta, "theta")?);
        Ok(self.inner.log_density_grad(theta_vec.view())?.to_vec())
    }

    /// Returns `(log_lik, lambda)`.
    #[pyo3(text_signature = "(self, theta)")]
    pub fn generated_quantities<'py>(
        &self, py: Python<'py>, theta: &Bound<'py, PyAny>,
    ) -> PyResult<(Vec<f64>, Vec<f64>)> {
        let theta_vec = Array1::from(extract_f64_vec(py, theta, "theta")?);
        let params = self.inner.transform().constrain(theta_vec.view())?;
        let gq = self.inner.generated_quantities(&params)?;
        Ok((gq.log_lik.to_vec(), gq.lambda.to_vec()))
    }

    #[pyo3(
        signature = (theta, include_gqs = true, seed = 0),
        text_signature = "(self, theta, /, include_gqs=True, seed=0)"
    )]
    pub fn write_array<'py>(
        &self, py: Python<'py>, theta: &Bound<'py, PyAny>, include_gqs: bool, seed: u64,
    ) -> PyResult<Vec<f64>> {
        let theta_vec = Array1::from(extract_f64_vec(py, theta, "theta")?);
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(self.inner.write_array(theta_vec.view(), include_gqs, &mut rng)?.to_vec())
    }

    #[pyo3(
        signature = (
            theta0,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
            verbose = None,
        ),
        text_signature = "(self, theta0, /, tol_grad=None, tol_cost=None, max_iter=None, \
                          line_searcher=None, lbfgs_mem=None, verbose=False)"
    )]
    pub fn posterior_mode<'py>(
        &self, py: Python<'py>, theta0: &Bound<'py, PyAny>, tol_grad: Option<f64>,
        tol_cost: Option<f64>, max_iter: Option<usize>, line_searcher: Option<&str>,
        lbfgs_mem: Option<usize>, verbose: Option<bool>,
    ) -> PyResult<ContestOptimOutcome> {
        let opts = extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem, verbose)?;
        let theta_vec = Array1::from(extract_f64_vec(py, theta0, "theta0")?);
        let outcome = self.inner.posterior_mode(theta_vec, &opts)?;
        Ok(ContestOptimOutcome { inner: outcome })
    }

    /// Laplace covariance at `mode`, row-major.
    #[pyo3(text_signature = "(self, mode)")]
    pub fn laplace_covariance<'py>(
        &self, py: Python<'py>, mode: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<Vec<f64>>> {
        let mode_vec = Array1::from(extract_f64_vec(py, mode, "mode")?);
        let approx = self.inner.laplace(&mode_vec)?;
        Ok(approx.covariance.rows().into_iter().map(|row| row.to_vec()).collect())
    }
}

/// BTGeneralizedPredict — Python-facing Bradley–Terry prediction model.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `BTGeneralizedPredict(player0_indexes, player1_indexes, X)`;
/// `N_newdata` is the length of the index arrays.
///
/// Notes
/// -----
/// - `generated_quantities` returns `y_pred` with `N_players` slots, padded
///   with `NaN`; `predict` returns exactly `N_newdata` draws.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_bpc.contest_models")]
pub struct BTGeneralizedPredict {
    pub inner: BTPredictModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BTGeneralizedPredict {
    #[new]
    #[pyo3(text_signature = "(player0_indexes, player1_indexes, x)")]
    pub fn new<'py>(
        player0_indexes: &Bound<'py, PyAny>, player1_indexes: &Bound<'py, PyAny>,
        x: PyReadonlyArray2<'py, f64>,
    ) -> PyResult<Self> {
        let n_newdata = player0_indexes.len()?;
        let (n_players, k) = (x.shape()[0], x.shape()[1]);
        let shape = ContestShape::predict(n_newdata as i64, n_players as i64, k as i64)?;
        let index = build_index(shape, x, player0_indexes, player1_indexes)?;
        Ok(BTGeneralizedPredict { inner: BTPredictModel::new(PredictData::from_index(index)) })
    }

    #[getter]
    pub fn model_name(&self) -> &'static str {
        self.inner.model_name()
    }

    #[getter]
    pub fn has_size_mismatch(&self) -> bool {
        self.inner.has_size_mismatch()
    }

    #[pyo3(signature = (include_gqs = true), text_signature = "(self, /, include_gqs=True)")]
    pub fn constrained_param_names(&self, include_gqs: bool) -> Vec<String> {
        self.inner.constrained_param_names(include_gqs)
    }

    #[pyo3(text_signature = "(self, b)")]
    pub fn win_probabilities<'py>(
        &self, py: Python<'py>, b: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<f64>> {
        let b_vec = Array1::from(extract_f64_vec(py, b, "B")?);
        Ok(self.inner.win_probabilities(b_vec.view())?.to_vec())
    }

    #[pyo3(signature = (b, seed = 0), text_signature = "(self, b, /, seed=0)")]
    pub fn predict<'py>(
        &self, py: Python<'py>, b: &Bound<'py, PyAny>, seed: u64,
    ) -> PyResult<Vec<i64>> {
        let b_vec = Array1::from(extract_f64_vec(py, b, "B")?);
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(self.inner.predict(b_vec.view(), &mut rng)?.to_vec())
    }

    #[pyo3(
        signature = (b, include_gqs = true, seed = 0),
        text_signature = "(self, b, /, include_gqs=True, seed=0)"
    )]
    pub fn write_array<'py>(
        &self, py: Python<'py>, b: &Bound<'py, PyAny>, include_gqs: bool, seed: u64,
    ) -> PyResult<Vec<f64>> {
        let b_vec = Array1::from(extract_f64_vec(py, b, "B")?);
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(self.inner.write_array(b_vec.view(), include_gqs, &mut rng)?.to_vec())
    }
}

/// ContestOptimOutcome — read-only view of an [`OptimOutcome`] for Python.
///
/// Instances are returned by `DavidsonGeneralized.posterior_mode` and are
/// not created directly by user code.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_bpc.contest_models")]
pub struct ContestOptimOutcome {
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ContestOptimOutcome {
    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.theta_hat.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        let mut evals: Vec<(String, u64)> =
            self.inner.fn_evals.iter().map(|(k, v)| (k.clone(), *v)).collect();
        evals.sort();
        evals
    }
}

/// _rust_bpc — PyO3 entry point.
///
/// Creates the `contest_models` submodule, adds the contest classes, and
/// registers it in `sys.modules` as `rust_bpc.contest_models` so dotted
/// imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_bpc<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let contest_models_mod = PyModule::new(py, "contest_models")?;
    contest_models(m, &contest_models_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    py.import("sys")?
        .getattr("modules")?
        .set_item("rust_bpc.contest_models", contest_models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn contest_models<'py>(rust_bpc: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<DavidsonGeneralized>()?;
    m.add_class::<BTGeneralizedPredict>()?;
    m.add_class::<ContestOptimOutcome>()?;
    rust_bpc.add_submodule(m)?;
    Ok(())
}
