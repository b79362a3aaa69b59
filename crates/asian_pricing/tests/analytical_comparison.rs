//! Monte Carlo estimates against closed-form prices.
//!
//! The closed forms assume continuous monitoring while the simulated
//! averages use N + 1 discrete fixings, so comparisons allow a small
//! discretisation term on top of the statistical tolerance.

use approx::assert_relative_eq;
use asian_core::types::{MarketParameters, OptionType, PricingMethod};
use asian_pricing::analytical::{bs_price, GeometricPricer};
use asian_pricing::mc::AsianMonteCarloPricer;
use asian_pricing::paths::{generate_gbm_paths, PathBatch, SimulationConfig};

/// Discretisation allowance for 252 daily fixings.
const DAILY_FIXING_ALLOWANCE: f64 = 0.05;

fn standard_market() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 0.05, 0.2, 1.0).unwrap()
}

fn scenario_market() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 0.0425, 0.43, 1.0).unwrap()
}

fn batch(market: &MarketParameters, n_paths: usize, n_steps: usize, seed: u64) -> PathBatch {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .seed(seed)
        .build()
        .unwrap();
    generate_gbm_paths(market, &config).unwrap()
}

// ============================================================================
// Geometric Asian: Monte Carlo vs Kemna-Vorst
// ============================================================================

#[test]
fn test_geometric_mc_matches_closed_form() {
    let market = standard_market();
    let paths = batch(&market, 100_000, 252, 42);

    for option_type in [OptionType::Call, OptionType::Put] {
        let analytical = GeometricPricer::quote(&market, option_type).unwrap();
        let mc = AsianMonteCarloPricer::geometric(market.strike, market.rate, option_type)
            .price(&paths)
            .unwrap();

        let error = (mc.price - analytical.price).abs();
        let tolerance = 3.0 * mc.std_error + DAILY_FIXING_ALLOWANCE;
        assert!(
            error < tolerance,
            "Geometric {}: MC={:.4}, Analytical={:.4}, Error={:.4}, Tolerance={:.4}",
            option_type,
            mc.price,
            analytical.price,
            error,
            tolerance
        );
    }
}

#[test]
fn test_arithmetic_dominates_geometric_on_same_batch() {
    let market = scenario_market();
    let paths = batch(&market, 20_000, 52, 7);

    let price = |pricer: AsianMonteCarloPricer| pricer.price(&paths).unwrap().price;
    let (k, r) = (market.strike, market.rate);

    // AM-GM holds path by path.
    assert!(
        price(AsianMonteCarloPricer::arithmetic(k, r, OptionType::Call))
            > price(AsianMonteCarloPricer::geometric(k, r, OptionType::Call))
    );
    assert!(
        price(AsianMonteCarloPricer::arithmetic(k, r, OptionType::Put))
            < price(AsianMonteCarloPricer::geometric(k, r, OptionType::Put))
    );
}

// ============================================================================
// European limiting case
// ============================================================================

#[test]
fn test_european_mc_matches_black_scholes() {
    let market = standard_market();
    // Terminal distribution is exact, so one step suffices.
    let paths = batch(&market, 200_000, 1, 2024);

    for option_type in [OptionType::Call, OptionType::Put] {
        let analytical = bs_price(
            market.spot,
            market.strike,
            market.rate,
            market.volatility,
            market.maturity,
            option_type,
        )
        .unwrap();
        let mc = AsianMonteCarloPricer::european(market.strike, market.rate, option_type)
            .price(&paths)
            .unwrap();
        assert!(
            (mc.price - analytical).abs() < 4.0 * mc.std_error,
            "European {}: MC={:.4} ± {:.4}, BS={:.4}",
            option_type,
            mc.price,
            mc.std_error,
            analytical
        );
    }
}

#[test]
fn test_asian_cheaper_than_european() {
    let market = standard_market();
    let paths = batch(&market, 20_000, 52, 99);
    let asian = AsianMonteCarloPricer::arithmetic(market.strike, market.rate, OptionType::Call)
        .price(&paths)
        .unwrap();
    let european = AsianMonteCarloPricer::european(market.strike, market.rate, OptionType::Call)
        .price(&paths)
        .unwrap();
    assert!(asian.price < european.price);
}

// ============================================================================
// Reference scenario: S0 = K = 100, r = 4.25%, σ = 43%, t = 1, N = 252
// ============================================================================

#[test]
fn test_reference_scenario_closed_form() {
    let quote = GeometricPricer::quote(&scenario_market(), OptionType::Call).unwrap();
    assert_eq!(quote.method, PricingMethod::ClosedForm);
    assert_relative_eq!(quote.price, 9.78, epsilon = 0.01);
}

#[test]
fn test_reference_scenario_monte_carlo() {
    let market = scenario_market();
    let paths = batch(&market, 100_000, 252, 20_240_101);
    let mc = AsianMonteCarloPricer::geometric(market.strike, market.rate, OptionType::Call)
        .price(&paths)
        .unwrap();

    assert_eq!(mc.method, PricingMethod::MonteCarlo { n_paths: 100_000 });
    assert!(
        mc.std_error > 0.045 && mc.std_error < 0.060,
        "std_error = {}",
        mc.std_error
    );
    assert!(
        (mc.price - 9.78).abs() < 4.0 * mc.std_error + DAILY_FIXING_ALLOWANCE,
        "MC={:.4} ± {:.4}",
        mc.price,
        mc.std_error
    );

    // 9.78 is the geometric reference; the arithmetic average dominates the
    // geometric one path by path and prices well above it.
    let arithmetic = AsianMonteCarloPricer::arithmetic(market.strike, market.rate, OptionType::Call)
        .price(&paths)
        .unwrap();
    assert!(arithmetic.price >= mc.price);
    assert!(
        arithmetic.price - 9.78 > 0.5,
        "arithmetic MC={:.4}",
        arithmetic.price
    );
}

#[test]
#[ignore = "1,000,000 paths x 252 steps; run with --ignored"]
fn test_reference_scenario_one_million_paths() {
    let market = scenario_market();
    let paths = batch(&market, 1_000_000, 252, 20_240_101);
    let mc = AsianMonteCarloPricer::geometric(market.strike, market.rate, OptionType::Call)
        .price(&paths)
        .unwrap();

    assert!(
        (mc.std_error - 0.016).abs() < 0.002,
        "std_error = {}",
        mc.std_error
    );
    assert!(
        (mc.price - 9.78).abs() < DAILY_FIXING_ALLOWANCE + 3.0 * mc.std_error,
        "MC={:.4} ± {:.4}",
        mc.price,
        mc.std_error
    );
}
