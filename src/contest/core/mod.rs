//! contest::core — data containers, strengths, outcome probabilities, and
//! parameter transforms shared by the contest models.
//!
//! Purpose
//! -------
//! Collect the building blocks the two models are assembled from, so that
//! `contest::models` only wires them together.
//!
//! Key behaviors
//! -------------
//! - Sizes and inputs: [`shape`], [`pairs`], [`features`], [`data`],
//!   [`context`], [`validation`].
//! - Numerics: [`strength`] (linear strengths), [`outcome`] (Davidson and
//!   Bradley–Terry probabilities), [`priors`] (normal priors).
//! - Parameters: [`params`], [`transform`].
//! - Error locations: [`site`].
//!
//! Conventions
//! -----------
//! - Player indexes and error positions are 1-based; internal storage is
//!   0-based.
pub mod context;
pub mod data;
pub mod features;
pub mod outcome;
pub mod pairs;
pub mod params;
pub mod priors;
pub mod shape;
pub mod site;
pub mod strength;
pub mod transform;
pub mod validation;

pub use self::context::{VarContext, VarValue};
pub use self::data::{DavidsonData, PredictData};
pub use self::features::{FeatureIndex, FeatureMatrix};
pub use self::outcome::{DavidsonProbs, bernoulli_ln_pmf, bt_win_prob};
pub use self::pairs::PlayerPairs;
pub use self::params::{DavidsonParams, PredictParams};
pub use self::priors::DavidsonPriors;
pub use self::shape::ContestShape;
pub use self::site::EvalSite;
pub use self::transform::{DavidsonTransform, ParamTransform, PredictTransform};
