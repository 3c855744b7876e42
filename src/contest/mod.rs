//! contest — pairwise contest models with feature-driven player strengths.
//!
//! Purpose
//! -------
//! Evaluate two fixed probabilistic models of head-to-head contests in which
//! every player is described by a feature vector and its strength is the
//! dot product of that vector with a shared coefficient vector `B`:
//!
//! - the **Davidson** model (win / loss / tie, tie propensity `nu`, normal
//!   priors), exposing a log density and generated quantities;
//! - the **Bradley–Terry prediction** model, drawing win/loss outcomes for
//!   new pairs under a fixed `B`.
//!
//! Key behaviors
//! -------------
//! - Validate raw contest data into immutable containers (`core::data`).
//! - Map between the flat unconstrained vector and named parameters
//!   (`core::transform`).
//! - Evaluate log densities, gradients, generated quantities, and
//!   predictive draws (`models`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Model data never changes after construction; every evaluation is a
//!   pure function of its inputs (plus the caller's RNG for draws).
//! - Errors are values, never panics: configuration problems and domain
//!   problems are both reported through [`ContestError`].
//!
//! Conventions
//! -----------
//! - Player indexes are 1-based, as supplied by the caller.
//! - The unconstrained vector is `[B_1, ..., B_K, nu]` (Davidson) or
//!   `[B_1, ..., B_K]` (prediction).
//!
//! Downstream usage
//! ----------------
//! - An external sampler drives `ContestModel::log_density` and
//!   `write_array`; `DavidsonModel::posterior_mode` runs L-BFGS instead.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` exercises the public
//!   surface end to end.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ContestShape, DavidsonData, DavidsonParams, DavidsonPriors, DavidsonTransform, EvalSite,
    FeatureIndex, FeatureMatrix, ParamTransform, PredictData, PredictParams, PredictTransform,
    VarContext,
};

pub use self::errors::{ContestError, ContestResult, ErrorKind, ParamError, ParamResult};

pub use self::models::{BTPredictModel, ContestModel, DavidsonModel, DavidsonQuantities};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_bpc::contest::prelude::*;
//
// to import the main contest-model surface in a single line.

pub mod prelude {
    pub use super::{
        BTPredictModel, ContestError, ContestModel, ContestResult, ContestShape, DavidsonData,
        DavidsonModel, DavidsonParams, DavidsonPriors, DavidsonQuantities, ErrorKind,
        ParamTransform, PredictData, PredictParams, VarContext,
    };
}
