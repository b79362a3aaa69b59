//! Property tests for parameter validation and mergeable statistics.

use asian_core::math::statistics::SampleStatistics;
use asian_core::types::MarketParameters;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_valid_parameters_accepted(
        spot in 1.0..500.0_f64,
        strike in 1.0..500.0_f64,
        rate in -0.05..0.2_f64,
        vol in 0.01..1.5_f64,
        maturity in 0.01..10.0_f64,
    ) {
        let market = MarketParameters::new(spot, strike, rate, vol, maturity);
        prop_assert!(market.is_ok());
    }

    #[test]
    fn test_non_positive_spot_rejected(spot in -500.0..=0.0_f64) {
        let err = MarketParameters::new(spot, 100.0, 0.05, 0.2, 1.0).unwrap_err();
        prop_assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_non_positive_volatility_rejected(vol in -2.0..=0.0_f64) {
        let err = MarketParameters::new(100.0, 100.0, 0.05, vol, 1.0).unwrap_err();
        prop_assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_merge_order_independent(
        values in prop::collection::vec(-100.0..100.0_f64, 2..200),
        split in 0usize..200,
    ) {
        let split = split % values.len();
        let whole = SampleStatistics::from_slice(&values);
        let (a, b) = values.split_at(split);
        let ab = SampleStatistics::from_slice(a).merged(SampleStatistics::from_slice(b));
        let ba = SampleStatistics::from_slice(b).merged(SampleStatistics::from_slice(a));

        prop_assert_eq!(ab.count(), whole.count());
        prop_assert!((ab.mean() - whole.mean()).abs() < 1e-9);
        prop_assert!((ba.mean() - whole.mean()).abs() < 1e-9);
        prop_assert!((ab.variance() - whole.variance()).abs() < 1e-6 * (1.0 + whole.variance()));
        prop_assert!((ba.variance() - whole.variance()).abs() < 1e-6 * (1.0 + whole.variance()));
    }
}
