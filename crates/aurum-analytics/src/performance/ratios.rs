//! Risk-adjusted return ratios and benchmark-relative statistics.
//!
//! Every ratio degrades to a neutral value (0, or `None` where "not
//! computable" has to be told apart from zero) instead of failing.

use aurum_math::{is_negligible_variance, mean, sample_std_dev};

use super::returns::annualized_return_with;

/// Sharpe ratio: `(annualized_return − rf) / annualized_volatility`.
///
/// Returns 0 when the volatility is zero or not finite.
///
/// ```rust
/// use aurum_analytics::performance::sharpe_ratio;
///
/// assert!((sharpe_ratio(0.08, 0.10, 0.03) - 0.5).abs() < 1e-12);
/// assert_eq!(sharpe_ratio(0.08, 0.0, 0.03), 0.0);
/// ```
#[must_use]
pub fn sharpe_ratio(annualized_return: f64, annualized_volatility: f64, risk_free_rate: f64) -> f64 {
    if !annualized_volatility.is_finite()
        || is_negligible_variance(annualized_volatility * annualized_volatility)
    {
        log::debug!("sharpe ratio undefined for volatility {annualized_volatility}; using 0");
        return 0.0;
    }
    (annualized_return - risk_free_rate) / annualized_volatility
}

/// Calmar ratio: `annualized_return / max_drawdown`.
///
/// Returns 0 when there was no drawdown.
#[must_use]
pub fn calmar_ratio(annualized_return: f64, max_drawdown: f64) -> f64 {
    if max_drawdown <= 0.0 || !max_drawdown.is_finite() {
        return 0.0;
    }
    annualized_return / max_drawdown
}

/// Sortino ratio of a monthly series.
///
/// See [`sortino_ratio_with`].
#[must_use]
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    sortino_ratio_with(returns, risk_free_rate, 12.0)
}

/// Sortino ratio: excess annualized return over downside deviation.
///
/// The per-period hurdle is `rf / ppy`. Downside deviation is the root mean
/// square of the shortfalls below the hurdle, averaged over the shortfall
/// periods only, then annualized by `√ppy`.
///
/// Returns 0 with fewer than two observations, when no period falls below
/// the hurdle, or when the downside deviation is zero.
#[must_use]
pub fn sortino_ratio_with(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let hurdle = risk_free_rate / periods_per_year;
    let (count, sum_sq) = returns
        .iter()
        .map(|r| r - hurdle)
        .filter(|excess| *excess < 0.0)
        .fold((0_usize, 0.0_f64), |(count, sum), excess| {
            (count + 1, sum + excess * excess)
        });

    if count == 0 {
        log::debug!("no period below the {hurdle} hurdle; sortino ratio is 0");
        return 0.0;
    }

    let downside_deviation = (sum_sq / count as f64).sqrt() * periods_per_year.sqrt();
    if downside_deviation <= 0.0 {
        return 0.0;
    }

    (annualized_return_with(returns, periods_per_year) - risk_free_rate) / downside_deviation
}

/// Per-period active returns, if the two series can be compared.
fn active_returns(portfolio: &[f64], benchmark: &[f64]) -> Option<Vec<f64>> {
    if portfolio.len() != benchmark.len() || portfolio.len() < 2 {
        log::debug!(
            "active returns need equal lengths of at least 2 (got {} and {})",
            portfolio.len(),
            benchmark.len()
        );
        return None;
    }
    Some(portfolio.iter().zip(benchmark).map(|(p, b)| p - b).collect())
}

/// Annualized standard deviation of the active returns, if non-zero.
fn annualized_active_risk(active: &[f64], periods_per_year: f64) -> Option<f64> {
    let sd = sample_std_dev(active).ok()?;
    if is_negligible_variance(sd * sd) {
        log::debug!("tracking error is zero");
        return None;
    }
    Some(sd * periods_per_year.sqrt())
}

/// Tracking error of a monthly series against its benchmark.
///
/// See [`tracking_error_with`].
#[must_use]
pub fn tracking_error(portfolio: &[f64], benchmark: &[f64]) -> Option<f64> {
    tracking_error_with(portfolio, benchmark, 12.0)
}

/// Tracking error: annualized sample standard deviation of active returns.
///
/// `None` unless both series have the same length of at least two, and
/// `None` when the portfolio tracks the benchmark exactly.
#[must_use]
pub fn tracking_error_with(portfolio: &[f64], benchmark: &[f64], periods_per_year: f64) -> Option<f64> {
    let active = active_returns(portfolio, benchmark)?;
    annualized_active_risk(&active, periods_per_year)
}

/// Information ratio of a monthly series against its benchmark.
///
/// See [`information_ratio_with`].
#[must_use]
pub fn information_ratio(portfolio: &[f64], benchmark: &[f64]) -> Option<f64> {
    information_ratio_with(portfolio, benchmark, 12.0)
}

/// Information ratio: annualized mean active return over tracking error.
///
/// The mean active return is annualized arithmetically (× ppy). Same `None`
/// rules as [`tracking_error_with`].
///
/// ```rust
/// use aurum_analytics::performance::information_ratio;
///
/// assert!(information_ratio(&[0.01, 0.02], &[0.01]).is_none());
/// assert!(information_ratio(&[0.01], &[0.01]).is_none());
/// ```
#[must_use]
pub fn information_ratio_with(
    portfolio: &[f64],
    benchmark: &[f64],
    periods_per_year: f64,
) -> Option<f64> {
    let active = active_returns(portfolio, benchmark)?;
    let risk = annualized_active_risk(&active, periods_per_year)?;
    let mean_active = mean(&active)?;
    Some(mean_active * periods_per_year / risk)
}
