//! Compounded and annualized return statistics.

use aurum_math::sample_std_dev;

/// Cumulative growth factor `Π(1 + rᵢ)`.
fn growth_factor(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r))
}

/// Total compounded return over the whole series: `Π(1 + rᵢ) − 1`.
///
/// Returns 0 for an empty series.
#[must_use]
pub fn total_return(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    growth_factor(returns) - 1.0
}

/// Annualized (geometric) return of a monthly series.
///
/// See [`annualized_return_with`].
#[must_use]
pub fn annualized_return(returns: &[f64]) -> f64 {
    annualized_return_with(returns, 12.0)
}

/// Annualized (geometric) return: `(Π(1 + rᵢ))^(ppy / n) − 1`.
///
/// Returns 0 for an empty series. A series that compounds to nothing (a
/// period of −100% or worse) annualizes to −1, a total loss.
///
/// # Example
///
/// ```rust
/// use aurum_analytics::performance::annualized_return_with;
///
/// // Twelve months of 1% compound to 12.68%.
/// let returns = [0.01; 12];
/// let annual = annualized_return_with(&returns, 12.0);
/// assert!((annual - 0.126_825).abs() < 1e-6);
/// ```
#[must_use]
pub fn annualized_return_with(returns: &[f64], periods_per_year: f64) -> f64 {
    let n = returns.len();
    if n == 0 {
        return 0.0;
    }

    let growth = growth_factor(returns);
    if growth <= 0.0 {
        log::debug!("series compounds to {growth}; annualized return is a total loss");
        return -1.0;
    }

    growth.powf(periods_per_year / n as f64) - 1.0
}

/// Annualized volatility of a monthly series.
///
/// See [`annualized_volatility_with`].
#[must_use]
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    annualized_volatility_with(returns, 12.0)
}

/// Annualized volatility: sample standard deviation (n − 1) × √ppy.
///
/// Returns 0 when there are fewer than two observations.
#[must_use]
pub fn annualized_volatility_with(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    sample_std_dev(returns).map_or(0.0, |sd| sd * periods_per_year.sqrt())
}
