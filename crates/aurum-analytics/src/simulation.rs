//! Synthetic return paths for demos and tests.
//!
//! Returns are drawn i.i.d. normal with a per-period mean and volatility
//! derived from annual targets. Normal shocks come from the Box-Muller
//! transform over two uniform draws.

use std::f64::consts::PI;

use aurum_core::{AssetId, Periodicity, ReturnSeries, ReturnUniverse};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Default horizon: five years of monthly returns.
pub const DEFAULT_PERIODS: usize = 60;

/// Target statistics of a simulated path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Target annualized (geometric) return.
    pub annual_return: f64,
    /// Target annualized volatility.
    pub annual_volatility: f64,
    /// Number of periods to generate.
    pub periods: usize,
    /// Period length.
    pub periodicity: Periodicity,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            annual_return: 0.07,
            annual_volatility: 0.12,
            periods: DEFAULT_PERIODS,
            periodicity: Periodicity::Monthly,
        }
    }
}

impl SimulationParams {
    /// Creates monthly parameters with the default horizon.
    #[must_use]
    pub fn new(annual_return: f64, annual_volatility: f64) -> Self {
        Self {
            annual_return,
            annual_volatility,
            ..Self::default()
        }
    }

    /// Sets the number of periods.
    #[must_use]
    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    /// Sets the periodicity.
    #[must_use]
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    /// Checks that the targets describe a possible path.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.annual_return.is_finite() || self.annual_return <= -1.0 {
            return Err(AnalyticsError::invalid_input(format!(
                "annual return must be finite and above -100%, got {}",
                self.annual_return
            )));
        }
        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            return Err(AnalyticsError::invalid_input(format!(
                "annual volatility must be finite and non-negative, got {}",
                self.annual_volatility
            )));
        }
        Ok(())
    }

    /// Per-period mean: `(1 + annual_return)^(1/ppy) − 1`.
    #[must_use]
    pub fn period_mean(&self) -> f64 {
        (1.0 + self.annual_return).powf(1.0 / self.periodicity.annualization_factor()) - 1.0
    }

    /// Per-period volatility: `annual_volatility / √ppy`.
    #[must_use]
    pub fn period_volatility(&self) -> f64 {
        self.annual_volatility / self.periodicity.annualization_factor().sqrt()
    }
}

/// Box-Muller transform: a standard normal draw from two uniforms.
///
/// `u1` must lie in (0, 1]; `u2` in [0, 1).
#[must_use]
pub fn box_muller(u1: f64, u2: f64) -> f64 {
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Generates a path using the caller's random number generator.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] if the parameters fail
/// [`SimulationParams::validate`].
pub fn generate_returns<R: Rng + ?Sized>(
    params: &SimulationParams,
    rng: &mut R,
) -> AnalyticsResult<ReturnSeries> {
    params.validate()?;

    let mean = params.period_mean();
    let vol = params.period_volatility();

    Ok((0..params.periods)
        .map(|_| {
            // gen() is in [0, 1); flip it so the logarithm stays finite.
            let u1 = 1.0 - rng.gen::<f64>();
            let u2 = rng.gen::<f64>();
            mean + vol * box_muller(u1, u2)
        })
        .collect())
}

/// Generates a reproducible path from a seed.
///
/// ```rust
/// use aurum_analytics::simulation::{generate_returns_seeded, SimulationParams};
///
/// let params = SimulationParams::new(0.07, 0.12);
/// let a = generate_returns_seeded(&params, 42).unwrap();
/// let b = generate_returns_seeded(&params, 42).unwrap();
///
/// assert_eq!(a.len(), 60);
/// assert_eq!(a, b);
/// ```
pub fn generate_returns_seeded(params: &SimulationParams, seed: u64) -> AnalyticsResult<ReturnSeries> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_returns(params, &mut rng)
}

/// Generates independent paths for several assets.
///
/// Each asset draws from its own generator, seeded in order from a master
/// generator, so results depend only on `seed` and the order of `assets`.
pub fn simulate_universe(
    assets: &[(AssetId, SimulationParams)],
    seed: u64,
) -> AnalyticsResult<ReturnUniverse> {
    let mut master = StdRng::seed_from_u64(seed);
    let mut universe = ReturnUniverse::new();
    for (asset, params) in assets {
        let series = generate_returns_seeded(params, master.gen())?;
        log::debug!("simulated {} periods for {asset}", series.len());
        universe.insert(asset.clone(), series);
    }
    Ok(universe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_muller_known_points() {
        // u1 = 1 gives a zero radius.
        assert_eq!(box_muller(1.0, 0.3), 0.0);
        // u2 = 0 puts the draw on the positive axis.
        assert_relative_eq!(
            box_muller((-0.5_f64).exp(), 0.0),
            1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            box_muller((-0.5_f64).exp(), 0.5),
            -1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_period_parameters() {
        let params = SimulationParams::new(0.07, 0.12);
        assert_relative_eq!(params.period_mean(), 1.07_f64.powf(1.0 / 12.0) - 1.0);
        assert_relative_eq!(params.period_volatility(), 0.12 / 12.0_f64.sqrt());
    }

    #[test]
    fn test_validate() {
        assert!(SimulationParams::new(0.07, 0.12).validate().is_ok());
        assert!(SimulationParams::new(-1.0, 0.12).validate().is_err());
        assert!(SimulationParams::new(0.07, -0.01).validate().is_err());
        assert!(SimulationParams::new(f64::NAN, 0.12).validate().is_err());
        assert!(generate_returns_seeded(&SimulationParams::new(0.07, -0.1), 1).is_err());
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let params = SimulationParams::new(0.05, 0.0).with_periods(12);
        let series = generate_returns_seeded(&params, 7).unwrap();
        assert!(series.iter().all(|r| (r - params.period_mean()).abs() < 1e-15));
    }

    #[test]
    fn test_seeded_paths_differ_by_seed() {
        let params = SimulationParams::default();
        let a = generate_returns_seeded(&params, 1).unwrap();
        let b = generate_returns_seeded(&params, 2).unwrap();
        assert_eq!(a.len(), DEFAULT_PERIODS);
        assert_ne!(a, b);
    }

    #[test]
    fn test_simulate_universe() {
        let assets = vec![
            (AssetId::new("EQUITY"), SimulationParams::new(0.08, 0.16).with_periods(24)),
            (AssetId::new("BONDS"), SimulationParams::new(0.03, 0.05).with_periods(36)),
        ];
        let universe = simulate_universe(&assets, 99).unwrap();
        assert_eq!(universe.len(), 2);
        assert_eq!(universe.get("EQUITY").unwrap().len(), 24);
        assert_eq!(universe.get("BONDS").unwrap().len(), 36);
        assert_eq!(universe, simulate_universe(&assets, 99).unwrap());
        assert_ne!(
            universe.get("EQUITY"),
            simulate_universe(&assets, 100).unwrap().get("EQUITY")
        );
    }
}
