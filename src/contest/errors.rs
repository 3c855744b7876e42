//! Errors for pairwise contest models (data construction, named sources,
//! parameter vectors, and evaluation-time domain failures).
//!
//! This module defines a model error type, [`ContestError`], and a parameter
//! error type, [`ParamError`], used by the Rust core and, behind the
//! `python-bindings` feature, converted into Python `ValueError`s.
//!
//! ## Conventions
//! - Player indexes and positions in messages are **1-based** (they refer to
//!   the contest data as supplied by the caller).
//! - Every variant belongs to one of two kinds, see [`ErrorKind`]:
//!   configuration problems (sizes, indexes, shapes, missing names) and
//!   domain problems (invalid prior scales or outcomes).
//! - Evaluation-time variants carry an [`EvalSite`] naming where the failure
//!   happened.
use crate::contest::core::site::EvalSite;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for contest-model operations that may produce [`ContestError`].
pub type ContestResult<T> = Result<T, ContestError>;

/// Result alias for parameter-vector checks that may produce [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Coarse classification of every contest error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Sizes, indexes, shapes, or names do not fit together.
    Configuration,
    /// A value lies outside the support of the distribution that uses it.
    Domain,
}

/// Unified error type for contest models.
#[derive(Debug, Clone, PartialEq)]
pub enum ContestError {
    // ---- Sizes and indexes ----
    /// A count (`N_total`, `N_players`, `K`, ...) is below 1.
    InvalidCount { field: &'static str, value: i64 },

    /// A player index is below 1.
    InvalidPlayerIndex { field: &'static str, position: usize, value: i64 },

    /// A player index exceeds `N_players` when dereferenced.
    PlayerIndexOutOfRange { site: EvalSite, index: usize, n_players: usize },

    /// An indicator (`y`, `ties`) lies outside `0..=max`.
    InvalidIndicator { field: &'static str, position: usize, value: i64, max: i64 },

    /// A flat buffer does not have the length implied by the declared sizes.
    BufferLengthMismatch { field: &'static str, expected: usize, actual: usize },

    /// A coefficient vector does not have length `K`.
    CoefficientLengthMismatch { expected: usize, actual: usize },

    /// More new pairs than `y_pred` slots (`N_newdata > N_players`).
    PredictionSlotOutOfRange { n_newdata: usize, n_players: usize },

    // ---- Named sources ----
    /// A required named variable is absent.
    MissingVariable { name: String },

    /// A named variable has the wrong declared dimensions.
    DimsMismatch { name: String, expected: Vec<usize>, found: Vec<usize> },

    /// A named variable holds reals where integers are required.
    WrongVariableType { name: String, expected: &'static str },

    // ---- Parameter vectors ----
    /// Wrapper for [`ParamError`].
    Param(ParamError),

    // ---- Domain ----
    /// A prior scale is negative or NaN.
    NegativePriorScale { field: &'static str, value: f64 },

    /// A prior location is not finite.
    InvalidPriorLocation { field: &'static str, value: f64 },

    /// A prior scale is not strictly positive when the density is evaluated.
    InvalidPriorScale { site: EvalSite, value: f64 },

    /// A non-tie observation carries an outcome outside `{0, 1}`.
    OutcomeOutsideSupport { site: EvalSite, value: u8 },

    /// A success probability handed to the Bernoulli sampler is not in `[0, 1]`.
    InvalidProbability { site: EvalSite, value: f64 },
}

impl ContestError {
    /// Classify this error as a configuration or a domain problem.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContestError::NegativePriorScale { .. }
            | ContestError::InvalidPriorLocation { .. }
            | ContestError::InvalidPriorScale { .. }
            | ContestError::OutcomeOutsideSupport { .. }
            | ContestError::InvalidProbability { .. } => ErrorKind::Domain,
            ContestError::Param(err) => err.kind(),
            _ => ErrorKind::Configuration,
        }
    }
}

impl std::error::Error for ContestError {}

impl std::fmt::Display for ContestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Sizes and indexes ----
            ContestError::InvalidCount { field, value } => {
                write!(f, "{field} must be at least 1; found {value}")
            }
            ContestError::InvalidPlayerIndex { field, position, value } => {
                write!(f, "{field}[{position}] must be at least 1; found {value}")
            }
            ContestError::PlayerIndexOutOfRange { site, index, n_players } => {
                write!(f, "Player index {index} out of range [1, {n_players}] at {site}")
            }
            ContestError::InvalidIndicator { field, position, value, max } => {
                write!(f, "{field}[{position}] must lie in [0, {max}]; found {value}")
            }
            ContestError::BufferLengthMismatch { field, expected, actual } => {
                write!(f, "{field} has length {actual}; expected {expected}")
            }
            ContestError::CoefficientLengthMismatch { expected, actual } => {
                write!(f, "Coefficient vector B has length {actual}; expected K = {expected}")
            }
            ContestError::PredictionSlotOutOfRange { n_newdata, n_players } => {
                write!(
                    f,
                    "y_pred holds N_players = {n_players} slots but N_newdata = {n_newdata} draws were requested"
                )
            }

            // ---- Named sources ----
            ContestError::MissingVariable { name } => {
                write!(f, "Variable {name} missing")
            }
            ContestError::DimsMismatch { name, expected, found } => {
                write!(f, "Variable {name} declared with dims {expected:?}; found {found:?}")
            }
            ContestError::WrongVariableType { name, expected } => {
                write!(f, "Variable {name} must hold {expected} values")
            }

            // ---- Parameter vectors ----
            ContestError::Param(err) => write!(f, "{err}"),

            // ---- Domain ----
            ContestError::NegativePriorScale { field, value } => {
                write!(f, "{field} must be non-negative; found {value}")
            }
            ContestError::InvalidPriorLocation { field, value } => {
                write!(f, "{field} must be finite; found {value}")
            }
            ContestError::InvalidPriorScale { site, value } => {
                write!(
                    f,
                    "Scale parameter is {value}, but must be positive and finite at {site}"
                )
            }
            ContestError::OutcomeOutsideSupport { site, value } => {
                write!(f, "Outcome is {value}, but must be in [0, 1] at {site}")
            }
            ContestError::InvalidProbability { site, value } => {
                write!(f, "Probability is {value}, but must be in [0, 1] at {site}")
            }
        }
    }
}

impl From<ParamError> for ContestError {
    fn from(err: ParamError) -> Self {
        ContestError::Param(err)
    }
}

/// Convert a [`ContestError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ContestError> for PyErr {
    fn from(err: ContestError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Errors for unconstrained parameter vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Theta length does not match the number of unconstrained parameters.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Theta entries must be finite before optimization starts.
    NonFiniteTheta { index: usize, value: f64 },
}

impl ParamError {
    /// Every parameter-vector problem is a configuration problem.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::NonFiniteTheta { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
