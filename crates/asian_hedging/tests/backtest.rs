//! Backtests over a synthetic daily series.

use asian_core::types::{AverageType, MarketParameters};
use asian_hedging::{
    BacktestConfig, BacktestEngine, HedgedPayoff, HedgingStrategy, PremiumSource, PricePoint,
};
use asian_pricing::paths::{generate_gbm_paths, SimulationConfig};
use chrono::{Days, NaiveDate};

const N_POINTS: usize = 301;

fn synthetic_series(seed: u64) -> Vec<PricePoint> {
    let steps = N_POINTS - 1;
    let market = MarketParameters::new(50.0, 50.0, 0.02, 0.30, steps as f64 / 252.0).unwrap();
    let config = SimulationConfig::builder()
        .n_paths(1)
        .n_steps(steps)
        .seed(seed)
        .build()
        .unwrap();
    let batch = generate_gbm_paths(&market, &config).unwrap();
    let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();

    batch
        .path(0)
        .unwrap()
        .prices()
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            PricePoint::new(start.checked_add_days(Days::new(i as u64)).unwrap(), price)
        })
        .collect()
}

#[test]
fn test_monthly_windows() {
    let series = synthetic_series(17);
    let config = BacktestConfig {
        rate: 0.02,
        ..BacktestConfig::new(21)
    };
    let report = BacktestEngine::new(config).unwrap().run(&series).unwrap();

    // Starts 21, 42, ..., 273; 273 + 21 = 294 < 301.
    assert_eq!(report.summary.n_windows, 13);
    assert_eq!(report.windows[0].start, series[21].date);
    assert_eq!(report.windows[0].end, series[42].date);

    for pair in report.windows.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    for w in &report.windows {
        assert!(w.volatility > 0.05 && w.volatility < 1.0, "vol {}", w.volatility);
        assert!(w.premium > 0.0);
        assert!(w.payoff >= 0.0);
        assert!(w.discounted_pnl.abs() <= w.pnl.abs());
    }

    let profitable = report.windows.iter().filter(|w| w.pnl > 0.0).count();
    assert_eq!(
        report.summary.profitable_fraction,
        profitable as f64 / report.windows.len() as f64
    );
}

#[test]
fn test_overlapping_windows_and_strategies() {
    let series = synthetic_series(4);
    let base = BacktestConfig {
        stride: Some(5),
        moneyness: 1.05,
        ..BacktestConfig::new(42)
    };

    let conditional = BacktestEngine::new(base).unwrap().run(&series).unwrap();
    let naive = BacktestEngine::new(BacktestConfig {
        strategy: HedgingStrategy::Naive,
        ..base
    })
    .unwrap()
    .run(&series)
    .unwrap();

    assert_eq!(conditional.windows.len(), naive.windows.len());
    for (c, n) in conditional.windows.iter().zip(&naive.windows) {
        assert_eq!(c.start, n.start);
        assert_eq!(c.premium, n.premium);
        assert_eq!(c.payoff, n.payoff);
        assert!((c.strike - 1.05 * c.spot).abs() < 1e-12);
    }
}

#[test]
fn test_monte_carlo_premium_tracks_closed_form() {
    let series = synthetic_series(23);
    let payoff = HedgedPayoff::Asian(AverageType::Geometric);
    let closed = BacktestConfig {
        payoff,
        ..BacktestConfig::new(21)
    };
    let simulated = BacktestConfig {
        premium_source: PremiumSource::MonteCarlo {
            n_paths: 20_000,
            seed: Some(99),
        },
        ..closed
    };

    let cf = BacktestEngine::new(closed).unwrap().run(&series).unwrap();
    let mc = BacktestEngine::new(simulated).unwrap().run(&series).unwrap();

    for (a, b) in cf.windows.iter().zip(&mc.windows) {
        assert_eq!(a.volatility, b.volatility);
        assert!(
            (a.premium - b.premium).abs() < 0.06 * a.premium + 0.05,
            "closed form {} vs simulated {}",
            a.premium,
            b.premium
        );
    }
}

#[test]
fn test_series_too_short() {
    let series = synthetic_series(1);
    let engine = BacktestEngine::new(BacktestConfig::new(280)).unwrap();
    assert!(engine.run(&series).unwrap_err().is_invalid_parameter());
}
