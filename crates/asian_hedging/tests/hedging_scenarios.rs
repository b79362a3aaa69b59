//! Hedging scenarios over simulated GBM batches.

use asian_core::math::statistics::SampleStatistics;
use asian_core::types::{AverageType, MarketParameters, OptionType};
use asian_hedging::{HedgeContract, HedgedPayoff, HedgingStrategy, SelfFinancingHedger};
use asian_pricing::mc::AsianMonteCarloPricer;
use asian_pricing::paths::{generate_gbm_paths, PathBatch, SimulationConfig};

fn scenario_market() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 0.045, 0.40, 1.0).unwrap()
}

fn daily_batch(market: &MarketParameters, n_paths: usize, seed: u64) -> PathBatch {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(252)
        .seed(seed)
        .build()
        .unwrap();
    generate_gbm_paths(market, &config).unwrap()
}

fn hedger(market: &MarketParameters, payoff: HedgedPayoff, strategy: HedgingStrategy) -> SelfFinancingHedger {
    let contract = HedgeContract::from_market(market, OptionType::Call, payoff).unwrap();
    SelfFinancingHedger::new(contract, strategy).unwrap()
}

#[test]
fn test_conditional_hedge_beats_naive_and_unhedged() {
    let market = scenario_market();
    let batch = daily_batch(&market, 1_000, 2024);
    let payoff = HedgedPayoff::Asian(AverageType::Arithmetic);

    let conditional = hedger(&market, payoff, HedgingStrategy::Conditional)
        .hedge_batch(&batch)
        .unwrap();
    let naive = hedger(&market, payoff, HedgingStrategy::Naive)
        .hedge_batch(&batch)
        .unwrap();

    // Selling at the premium and holding nothing.
    let unhedged: SampleStatistics = AsianMonteCarloPricer::arithmetic(market.strike, market.rate, OptionType::Call)
        .discounted_payoffs(&batch)
        .unwrap()
        .into_iter()
        .collect();

    assert_eq!(conditional.n_paths(), 1_000);
    assert!(
        conditional.std_dev() < naive.std_dev(),
        "conditional std {} vs naive {}",
        conditional.std_dev(),
        naive.std_dev()
    );
    assert!(
        conditional.std_dev() < 0.5 * unhedged.std_dev(),
        "conditional std {} vs unhedged {}",
        conditional.std_dev(),
        unhedged.std_dev()
    );
    assert!(conditional.mean_abs() < naive.mean_abs());
}

/// Mean discounted P&L of one strategy over paths simulated with `drift`.
fn mean_pnl_under_drift(strategy: HedgingStrategy, drift: f64) -> f64 {
    let market = scenario_market();
    let batch = daily_batch(&market.with_drift(drift).unwrap(), 2_000, 31);
    hedger(&market, HedgedPayoff::Asian(AverageType::Arithmetic), strategy)
        .hedge_batch(&batch)
        .unwrap()
        .mean()
}

// Under the risk-neutral measure every self-financing hedge has the same
// expected P&L. The naive hedge's bias shows under real-world drift: its
// delta ignores the realised average and leaves a directional exposure.
#[test]
fn test_naive_hedge_mean_pnl_depends_on_drift() {
    let rate = scenario_market().rate;

    let naive_shift = mean_pnl_under_drift(HedgingStrategy::Naive, 0.15)
        - mean_pnl_under_drift(HedgingStrategy::Naive, rate);
    let conditional_shift = mean_pnl_under_drift(HedgingStrategy::Conditional, 0.15)
        - mean_pnl_under_drift(HedgingStrategy::Conditional, rate);

    assert!(naive_shift > 2.0, "naive mean shifted by {}", naive_shift);
    assert!(
        conditional_shift.abs() < 0.5,
        "conditional mean shifted by {}",
        conditional_shift
    );
    assert!(conditional_shift.abs() < 0.1 * naive_shift);
}

#[test]
fn test_conditional_put_hedge_reduces_dispersion() {
    let market = scenario_market();
    let batch = daily_batch(&market, 500, 77);
    let contract = HedgeContract::from_market(
        &market,
        OptionType::Put,
        HedgedPayoff::Asian(AverageType::Arithmetic),
    )
    .unwrap();

    let hedged = SelfFinancingHedger::new(contract, HedgingStrategy::Conditional)
        .unwrap()
        .hedge_batch(&batch)
        .unwrap();
    let unhedged: SampleStatistics = AsianMonteCarloPricer::arithmetic(market.strike, market.rate, OptionType::Put)
        .discounted_payoffs(&batch)
        .unwrap()
        .into_iter()
        .collect();

    assert!(hedged.std_dev() < 0.5 * unhedged.std_dev());
}

#[test]
fn test_black_scholes_hedge_of_european() {
    let market = scenario_market();
    let batch = daily_batch(&market, 500, 5);
    let report = hedger(&market, HedgedPayoff::European, HedgingStrategy::BlackScholes)
        .hedge_batch(&batch)
        .unwrap();
    let unhedged: SampleStatistics = AsianMonteCarloPricer::european(market.strike, market.rate, OptionType::Call)
        .discounted_payoffs(&batch)
        .unwrap()
        .into_iter()
        .collect();

    assert!(report.std_dev() < 0.2 * unhedged.std_dev());
    assert!(report.mean().abs() < 4.0 * report.std_error() + 0.2);
}

#[test]
fn test_self_financing_reconstruction() {
    let market = scenario_market();
    let batch = daily_batch(&market, 20, 9);
    let grid = *batch.grid();

    for strategy in [HedgingStrategy::Conditional, HedgingStrategy::Naive] {
        let hedger = hedger(&market, HedgedPayoff::default(), strategy);
        for path in batch.paths() {
            let outcome = hedger.hedge_path(&path, &grid).unwrap();
            assert_eq!(outcome.states.len(), 253);
            assert_eq!(outcome.states[252].delta, 0.0);
            assert!(outcome.self_financing_residual() < 1e-9);
            assert!(outcome
                .states
                .iter()
                .all(|s| s.delta >= 0.0 && s.delta <= 1.0));
        }
    }
}

#[test]
fn test_hedge_batch_rejects_mismatched_maturity() {
    let market = scenario_market();
    let batch = daily_batch(&market, 10, 1);
    let contract = HedgeContract {
        maturity: 0.5,
        ..HedgeContract::from_market(&market, OptionType::Call, HedgedPayoff::default()).unwrap()
    };
    let err = SelfFinancingHedger::new(contract, HedgingStrategy::Conditional)
        .unwrap()
        .hedge_batch(&batch)
        .unwrap_err();
    assert!(err.is_invalid_parameter());
}
