//! Property-based tests for parameter transforms and contest probabilities.
//!
//! Uses proptest to check invariants that must hold for every finite input,
//! not just the hand-picked values in the unit tests.
use ndarray::Array1;
use proptest::prelude::*;
use rust_bpc::contest::{
    ContestModel, ContestShape, DavidsonData, DavidsonModel, DavidsonPriors, DavidsonTransform,
    ParamTransform, PredictTransform,
    core::{DavidsonProbs, bt_win_prob},
};

fn league() -> DavidsonModel {
    let shape = ContestShape::davidson(6, 4, 1).unwrap();
    let data = DavidsonData::new(
        shape,
        &[0.0, 1.0, 2.0, 3.0],
        &[1, 1, 2, 2, 3, 4],
        &[2, 3, 3, 4, 4, 1],
        &[1, 0, 1, 1, 0, 0],
        &[0, 0, 1, 0, 0, 1],
        DavidsonPriors::default(),
    )
    .unwrap();
    DavidsonModel::new(data)
}

proptest! {
    // ==================== Transforms ====================

    #[test]
    fn davidson_transform_round_trips(values in prop::collection::vec(-1e6..1e6f64, 2..8)) {
        let transform = DavidsonTransform { k: values.len() - 1 };
        let theta = Array1::from(values);
        let params = transform.constrain(theta.view()).unwrap();
        prop_assert_eq!(params.nu, theta[theta.len() - 1]);
        prop_assert_eq!(transform.unconstrain(&params).unwrap(), theta);
    }

    #[test]
    fn predict_transform_round_trips(values in prop::collection::vec(-1e6..1e6f64, 1..8)) {
        let transform = PredictTransform { k: values.len() };
        let theta = Array1::from(values);
        let params = transform.constrain(theta.view()).unwrap();
        prop_assert_eq!(transform.unconstrain(&params).unwrap(), theta);
    }

    #[test]
    fn wrong_length_never_constrains(k in 1usize..6, extra in 1usize..4) {
        let transform = DavidsonTransform { k };
        let theta = Array1::<f64>::zeros(k + 1 + extra);
        prop_assert!(transform.constrain(theta.view()).is_err());
    }

    // ==================== Probabilities ====================

    #[test]
    fn davidson_probabilities_are_bounded(
        lambda0 in -10.0..10.0f64,
        lambda1 in -10.0..10.0f64,
        nu in -3.0..3.0f64
    ) {
        let probs = DavidsonProbs::new(lambda0, lambda1, nu);
        prop_assert!(probs.p_draw > 0.0 && probs.p_draw < 1.0);
        prop_assert!(probs.p_1win > 0.0 && probs.p_1win < 1.0);
        prop_assert!(probs.p_draw + probs.p_1win <= 1.0 + 1e-12);
        let total = probs.p_draw + probs.p_1win + probs.p_0win();
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bt_probabilities_are_complementary(
        lambda0 in -10.0..10.0f64,
        lambda1 in -10.0..10.0f64
    ) {
        let p = bt_win_prob(lambda0, lambda1);
        let q = bt_win_prob(lambda1, lambda0);
        prop_assert!(p > 0.0 && p < 1.0);
        prop_assert!((p + q - 1.0).abs() < 1e-12);
    }

    // ==================== Log density ====================

    #[test]
    fn log_density_is_finite_for_finite_parameters(b in -3.0..3.0f64, nu in -3.0..3.0f64) {
        let model = league();
        let theta = Array1::from(vec![b, nu]);
        let lp = model.log_density(theta.view()).unwrap();
        prop_assert!(lp.is_finite());
        prop_assert!(lp < 0.0);
    }
}
