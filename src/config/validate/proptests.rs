//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_valid_spec() -> impl Strategy<Value = FitSpec> {
    (
        1usize..256,                       // batch_size
        1e-6f64..1.0,                      // lr
        1usize..100,                       // epochs
        prop::collection::vec(-5.0f64..5.0, 1..6), // synthetic weights
        0.0f64..0.9,                       // validation_split
        prop::sample::select(vec!["sgd", "adam"]),
    )
        .prop_map(|(batch_size, lr, epochs, weights, validation_split, name)| FitSpec {
            model: ModelSpec::default(),
            data: DataSpec {
                synthetic: Some(SyntheticSpec {
                    weights,
                    bias: 0.0,
                    samples: 32,
                    noise: 0.0,
                    seed: 0,
                }),
                ..Default::default()
            },
            optimizer: OptimSpec { name: name.to_string(), lr, params: HashMap::new() },
            training: TrainingParams {
                epochs,
                batch_size,
                validation_split,
                ..Default::default()
            },
            callbacks: CallbacksSpec::default(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.training.batch_size = 0;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_lr_out_of_range_fails(
        spec in arb_valid_spec(),
        lr in prop_oneof![-10.0f64..=0.0, 1.0001f64..10.0],
    ) {
        let mut spec = spec;
        spec.optimizer.lr = lr;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn prop_declared_features_must_match(spec in arb_valid_spec(), extra in 1usize..4) {
        let mut spec = spec;
        let actual = spec.data.synthetic.as_ref().map_or(0, |s| s.weights.len());
        spec.model.features = Some(actual + extra);
        prop_assert!(
            matches!(
                validate_config(&spec),
                Err(ValidationError::FeatureMismatch { .. })
            ),
            "declared {} features against {}",
            actual + extra,
            actual
        );
    }
}
