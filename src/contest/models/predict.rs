//! Bradley–Terry generalized prediction model.
//!
//! Given coefficients `B`, draws one win/loss outcome per new pair:
//! `y_pred[i] ~ Bernoulli(p1 / (p0 + p1))` with `p = exp(lambda)`. The model
//! has no priors and no likelihood, so its log density is `0` for any vector
//! of the right length.
//!
//! `y_pred` is reported with `N_players` slots, of which the first
//! `N_newdata` are filled and the rest stay `NaN`. When `N_newdata` exceeds
//! `N_players` the draws do not fit and generated quantities fail with
//! `PredictionSlotOutOfRange`; [`BTPredictModel::predict`] itself always
//! returns `N_newdata` draws.
use crate::contest::{
    core::{
        context::VarContext,
        data::PredictData,
        outcome::bt_win_prob,
        params::PredictParams,
        site::EvalSite,
        strength::{check_coefficients, pair_strengths},
        transform::{ParamTransform, PredictTransform},
    },
    errors::{ContestError, ContestResult},
    models::traits::ContestModel,
};
use ndarray::{Array1, ArrayView1, s};
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

#[derive(Debug, Clone, PartialEq)]
pub struct BTPredictModel {
    data: PredictData,
    transform: PredictTransform,
}

impl BTPredictModel {
    pub fn new(data: PredictData) -> Self {
        let transform = PredictTransform { k: data.shape().k };
        BTPredictModel { data, transform }
    }

    pub fn from_context(ctx: &VarContext) -> ContestResult<Self> {
        Ok(Self::new(PredictData::from_context(ctx)?))
    }

    pub fn data(&self) -> &PredictData {
        &self.data
    }

    /// `true` when `N_newdata != N_players`, i.e. `y_pred` is padded with
    /// `NaN` or cannot hold every draw.
    pub fn has_size_mismatch(&self) -> bool {
        let shape = self.data.shape();
        shape.n_obs != shape.n_players
    }

    /// `p1_win` of every new pair, length `N_newdata`.
    ///
    /// # Errors
    /// - `CoefficientLengthMismatch` if `b.len() != K`.
    /// - `PlayerIndexOutOfRange` at `EvalSite::Prediction`.
    pub fn win_probabilities(&self, b: ArrayView1<f64>) -> ContestResult<Array1<f64>> {
        check_coefficients(b, self.transform.k)?;
        let index = self.data.index();
        (0..self.data.shape().n_obs)
            .map(|i| {
                let site = EvalSite::Prediction { i: i + 1 };
                let (lambda0, lambda1) = pair_strengths(index, i, b, site)?;
                Ok(bt_win_prob(lambda0, lambda1))
            })
            .collect::<ContestResult<Vec<f64>>>()
            .map(Array1::from)
    }

    /// One Bernoulli draw per new pair, in input order.
    ///
    /// # Errors
    /// - Those of [`BTPredictModel::win_probabilities`].
    /// - `InvalidProbability` if a win probability is NaN (overflowing
    ///   strengths).
    pub fn predict<R: Rng + ?Sized>(&self, b: ArrayView1<f64>, rng: &mut R) -> ContestResult<Array1<i64>> {
        let probs = self.win_probabilities(b)?;
        let mut draws = Array1::<i64>::zeros(probs.len());
        for (i, (&p, slot)) in probs.iter().zip(draws.iter_mut()).enumerate() {
            let coin = Bernoulli::new(p).map_err(|_| ContestError::InvalidProbability {
                site: EvalSite::Prediction { i: i + 1 },
                value: p,
            })?;
            *slot = i64::from(coin.sample(rng));
        }
        Ok(draws)
    }

    /// `y_pred` with `N_players` slots; unfilled slots are `NaN`.
    ///
    /// # Errors
    /// - `PredictionSlotOutOfRange` if `N_newdata > N_players`.
    /// - Those of [`BTPredictModel::predict`].
    pub fn generated_quantities<R: Rng + ?Sized>(
        &self, params: &PredictParams, rng: &mut R,
    ) -> ContestResult<Array1<f64>> {
        let shape = self.data.shape();
        if shape.n_obs > shape.n_players {
            return Err(ContestError::PredictionSlotOutOfRange {
                n_newdata: shape.n_obs,
                n_players: shape.n_players,
            });
        }
        let draws = self.predict(params.b.view(), rng)?;
        let mut y_pred = Array1::from_elem(shape.n_players, f64::NAN);
        y_pred.slice_mut(s![..shape.n_obs]).assign(&draws.mapv(|d| d as f64));
        Ok(y_pred)
    }
}

impl ContestModel for BTPredictModel {
    type Transform = PredictTransform;

    const PARAM_BLOCKS: usize = 1;

    fn model_name(&self) -> &'static str {
        "bt_generalized_predict"
    }

    fn transform(&self) -> &PredictTransform {
        &self.transform
    }

    fn log_density(&self, theta: ArrayView1<f64>) -> ContestResult<f64> {
        self.transform.check_len(theta)?;
        Ok(self.transform.log_jacobian(theta))
    }

    fn param_names(&self) -> Vec<&'static str> {
        vec!["B", "y_pred"]
    }

    fn param_dims(&self) -> Vec<Vec<usize>> {
        let shape = self.data.shape();
        vec![vec![shape.k], vec![shape.n_players]]
    }

    fn write_array<R: Rng + ?Sized>(
        &self, theta: ArrayView1<f64>, include_gqs: bool, rng: &mut R,
    ) -> ContestResult<Array1<f64>> {
        let params = self.transform.constrain(theta)?;
        let mut out = params.b.to_vec();
        if include_gqs {
            out.extend(self.generated_quantities(&params, rng)?.iter());
        }
        Ok(Array1::from(out))
    }
}
