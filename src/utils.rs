//! utils — conversion helpers for the Python bindings.
//!
//! Every helper here turns loosely typed Python input (numpy arrays, pandas
//! series, plain sequences) into the typed values the contest models expect.
//! Conversion failures become `TypeError`; validation failures from the core
//! crate are mapped through their `From<_> for PyErr` impls.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::optimization::mode_finder::{LineSearcher, MLEOptions, Tolerances};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Read a 1-D `float64` array-like, copying only when the input is not
/// already a contiguous numpy array.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Read a 1-D `float64` array-like into an owned vector.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, field: &str,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{field} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(slice.to_vec())
}

/// Read a 1-D integer array-like (indexes, outcomes, tie flags).
///
/// Integer numpy arrays of any width and plain sequences of Python ints are
/// accepted; floats are rejected rather than truncated.
#[cfg(feature = "python-bindings")]
pub fn extract_i64_vec<'py>(raw: &Bound<'py, PyAny>, field: &str) -> PyResult<Vec<i64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray1<i64>>() {
        return Ok(arr_ro.as_array().to_vec());
    }
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray1<i32>>() {
        return Ok(arr_ro.as_array().iter().map(|&v| i64::from(v)).collect());
    }
    raw.extract::<Vec<i64>>()
        .map_err(|_| PyTypeError::new_err(format!("{field} must be a 1-D sequence of integers")))
}

/// Assemble [`MLEOptions`] from optional keyword arguments.
///
/// Defaults: `tol_grad = 1e-6`, `max_iter = 300`, More–Thuente, default
/// L-BFGS memory. Passing any tolerance replaces the whole default set.
#[cfg(feature = "python-bindings")]
pub fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, verbose: Option<bool>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let defaults = MLEOptions::default();
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter)?
    };

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name)?,
        None => defaults.line_searcher,
    };

    Ok(MLEOptions::new(tols, ls, verbose.unwrap_or(false), lbfgs_mem)?)
}
