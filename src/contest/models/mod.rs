//! contest::models — the Davidson model and the Bradley–Terry prediction
//! model, both implementing [`ContestModel`].
//!
//! - [`davidson`]: log density with priors, analytic gradient, generated
//!   quantities, posterior mode, and Laplace approximation.
//! - [`predict`]: Bernoulli draws for new pairs under fixed coefficients.
//! - [`traits`]: the shared capability.

pub mod davidson;
pub mod predict;
pub mod traits;

pub use self::davidson::{DavidsonModel, DavidsonQuantities};
pub use self::predict::BTPredictModel;
pub use self::traits::ContestModel;
