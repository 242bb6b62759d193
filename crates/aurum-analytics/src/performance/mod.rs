//! Historical performance engine.
//!
//! Pure functions over periodic return series (fractional decimals, monthly by
//! default). Functions without a suffix assume monthly data; the `*_with`
//! variants take the number of periods per year.
//!
//! - **Returns**: total, annualized return and annualized volatility
//! - **Ratios**: Sharpe, Sortino, Calmar, information ratio, tracking error
//! - **Drawdown**: maximum drawdown and the underwater curve
//!
//! Insufficient inputs never fail: each metric falls back to 0, or to `None`
//! where the benchmark-relative figure is not computable.

mod drawdown;
mod metrics;
mod ratios;
mod returns;

pub use drawdown::{drawdown_series, max_drawdown};
pub use metrics::{
    calculate_historical_metrics, calculate_historical_metrics_with,
    calculate_performance_summary, PerformanceMetrics, PerformanceSummary,
};
pub use ratios::{
    calmar_ratio, information_ratio, information_ratio_with, sharpe_ratio, sortino_ratio,
    sortino_ratio_with, tracking_error, tracking_error_with,
};
pub use returns::{
    annualized_return, annualized_return_with, annualized_volatility, annualized_volatility_with,
    total_return,
};
