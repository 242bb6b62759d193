//! Property-based tests for the statistical primitives.

use aurum_math::{correlation, sample_covariance, sample_variance};
use proptest::prelude::*;

fn returns(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.5f64..0.5, len)
}

proptest! {
    #[test]
    fn variance_is_non_negative(x in prop::collection::vec(-0.5f64..0.5, 2..60)) {
        prop_assert!(sample_variance(&x).unwrap() >= 0.0);
    }

    #[test]
    fn covariance_is_symmetric((x, y) in (2usize..40).prop_flat_map(|n| (returns(n), returns(n)))) {
        let xy = sample_covariance(&x, &y).unwrap();
        let yx = sample_covariance(&y, &x).unwrap();
        prop_assert!((xy - yx).abs() < 1e-15);
    }

    #[test]
    fn correlation_is_bounded((x, y) in (3usize..40).prop_flat_map(|n| (returns(n), returns(n)))) {
        if let Ok(rho) = correlation(&x, &y) {
            prop_assert!((-1.0..=1.0).contains(&rho));
        }
    }
}
