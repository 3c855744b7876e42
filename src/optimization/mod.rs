//! optimization — posterior-mode search and its error surface.
//!
//! Purpose
//! -------
//! Fit contest models by maximizing their log density with argmin's L-BFGS,
//! without exposing argmin types to callers.
//!
//! Key behaviors
//! -------------
//! - [`mode_finder`]: the [`mode_finder::LogDensity`] trait, solver
//!   configuration, and [`mode_finder::maximize`].
//! - [`errors`]: [`errors::OptError`] gathers configuration mistakes,
//!   numerical failures, argmin errors, and wrapped model errors under one
//!   result alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - The solver minimizes `-log p(θ)`; all reported values are `log p`.
//! - Nothing in this module logs unless the `obs_slog` feature is enabled
//!   and a run is marked verbose.
//!
//! Testing notes
//! -------------
//! - Submodules test solver wiring on toy quadratics; contest-model tests
//!   run complete mode searches.

pub mod errors;
pub mod mode_finder;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::mode_finder::prelude::*;
}
