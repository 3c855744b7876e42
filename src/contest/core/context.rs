//! Named variable source for data and initial values.
//!
//! Purpose
//! -------
//! Provide a small in-memory container of named integer/real arrays with
//! declared dimensions, used to build model data by name
//! (`DavidsonData::from_context`, `PredictData::from_context`) and to read
//! named initial values (`ParamTransform::transform_inits`). Parsing of any
//! file format into a [`VarContext`] happens outside this crate.
//!
//! Key behaviors
//! -------------
//! - Variables are inserted with explicit dims; the value count must equal
//!   the product of the dims (`[]` is a scalar).
//! - Lookups validate presence and dims and return
//!   [`ContestError::MissingVariable`] / [`ContestError::DimsMismatch`]
//!   otherwise.
//! - Integer variables may be read as reals; real variables may not be read
//!   as integers.
//!
//! Conventions
//! -----------
//! - Multi-dimensional values are stored in column-major order, so a
//!   `[N_players, K]` matrix lists feature 1 of every player first.
use crate::contest::errors::{ContestError, ContestResult};
use std::collections::HashMap;

/// Stored values of one named variable.
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    Int(Vec<i64>),
    Real(Vec<f64>),
}

impl VarValue {
    fn len(&self) -> usize {
        match self {
            VarValue::Int(v) => v.len(),
            VarValue::Real(v) => v.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Var {
    dims: Vec<usize>,
    value: VarValue,
}

/// In-memory named variable source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VarContext {
    vars: HashMap<String, Var>,
}

impl VarContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an integer variable.
    ///
    /// # Errors
    /// - `DimsMismatch` if `values.len()` differs from the product of `dims`.
    ///
    /// # Examples
    /// ```
    /// use rust_bpc::contest::core::context::VarContext;
    /// let ctx = VarContext::new().with_int("N_total", &[], vec![3]).unwrap();
    /// assert_eq!(ctx.int_scalar("N_total").unwrap(), 3);
    /// ```
    pub fn with_int(self, name: &str, dims: &[usize], values: Vec<i64>) -> ContestResult<Self> {
        self.insert(name, dims, VarValue::Int(values))
    }

    /// Add a real variable.
    ///
    /// # Errors
    /// - `DimsMismatch` if `values.len()` differs from the product of `dims`.
    pub fn with_real(self, name: &str, dims: &[usize], values: Vec<f64>) -> ContestResult<Self> {
        self.insert(name, dims, VarValue::Real(values))
    }

    /// Integer values of `name`, checked against `expected` dims.
    ///
    /// # Errors
    /// - `MissingVariable`, `DimsMismatch`, or `WrongVariableType` for reals.
    pub fn ints(&self, name: &str, expected: &[usize]) -> ContestResult<&[i64]> {
        match &self.lookup(name, expected)?.value {
            VarValue::Int(v) => Ok(v),
            VarValue::Real(_) => {
                Err(ContestError::WrongVariableType { name: name.to_string(), expected: "integer" })
            }
        }
    }

    /// Real values of `name`, checked against `expected` dims. Integers are promoted.
    pub fn reals(&self, name: &str, expected: &[usize]) -> ContestResult<Vec<f64>> {
        Ok(match &self.lookup(name, expected)?.value {
            VarValue::Int(v) => v.iter().map(|&x| x as f64).collect(),
            VarValue::Real(v) => v.clone(),
        })
    }

    pub fn int_scalar(&self, name: &str) -> ContestResult<i64> {
        Ok(self.ints(name, &[])?[0])
    }

    pub fn real_scalar(&self, name: &str) -> ContestResult<f64> {
        Ok(self.reals(name, &[])?[0])
    }

    // ---- Helper methods ----

    fn insert(mut self, name: &str, dims: &[usize], value: VarValue) -> ContestResult<Self> {
        let expected: usize = dims.iter().product();
        if value.len() != expected {
            return Err(ContestError::DimsMismatch {
                name: name.to_string(),
                expected: dims.to_vec(),
                found: vec![value.len()],
            });
        }
        self.vars.insert(name.to_string(), Var { dims: dims.to_vec(), value });
        Ok(self)
    }

    fn lookup(&self, name: &str, expected: &[usize]) -> ContestResult<&Var> {
        let var = self
            .vars
            .get(name)
            .ok_or_else(|| ContestError::MissingVariable { name: name.to_string() })?;
        if var.dims != expected {
            return Err(ContestError::DimsMismatch {
                name: name.to_string(),
                expected: expected.to_vec(),
                found: var.dims.clone(),
            });
        }
        Ok(var)
    }
}
