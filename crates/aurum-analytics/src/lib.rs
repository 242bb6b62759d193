//! # Aurum Analytics
//!
//! Stateless calculators that turn periodic return series into risk and
//! performance figures.
//!
//! - **Performance**: Annualized return and volatility, Sharpe, Sortino,
//!   Calmar, information ratio, tracking error, drawdown
//! - **Beta**: Sensitivity of every asset in a universe to a benchmark
//! - **Diversification**: Diversification ratio and average correlation
//! - **Simulation**: Seeded synthetic return paths
//!
//! ## Numeric policy
//!
//! Short or degenerate inputs never produce an error. A metric that cannot be
//! computed falls back to 0, or to `None` where zero would be misleading
//! (information ratio, beta). Errors are reserved for caller mistakes such as
//! an unknown benchmark or impossible simulation targets.
//!
//! ## Usage
//!
//! ```rust
//! use aurum_analytics::prelude::*;
//!
//! let universe = ReturnUniverse::new()
//!     .with_series("GLOBAL", vec![0.012, -0.021, 0.034, 0.008, -0.015, 0.022])
//!     .with_series("EM", vec![0.018, -0.035, 0.051, 0.004, -0.030, 0.041]);
//!
//! let config = AnalyticsConfig::default();
//! let metrics = calculate_historical_metrics_with(
//!     universe.get("EM").unwrap().as_slice(),
//!     Some(universe.get("GLOBAL").unwrap().as_slice()),
//!     &config,
//! );
//! assert!(metrics.information_ratio.is_some());
//!
//! let betas = compute_beta_matrix(&universe, "GLOBAL", &config)
//!     .unwrap()
//!     .sorted(SortPolicy::DescendingAbsBeta);
//! assert_eq!(betas.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod beta;
pub mod config;
pub mod diversification;
pub mod error;
pub mod performance;
pub mod simulation;

pub use beta::{compute_beta, compute_beta_matrix, BetaMatrix, BetaResult, SortPolicy};
pub use config::{AnalyticsConfig, DEFAULT_RISK_FREE_RATE};
pub use diversification::{compute_diversification_metrics, DiversificationMetrics};
pub use error::{AnalyticsError, AnalyticsResult};
pub use performance::{
    calculate_historical_metrics, calculate_historical_metrics_with,
    calculate_performance_summary, PerformanceMetrics, PerformanceSummary,
};
pub use simulation::{generate_returns, generate_returns_seeded, simulate_universe, SimulationParams};

/// Prelude module for convenient imports.
///
/// ```rust
/// use aurum_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::beta::{compute_beta, compute_beta_matrix, BetaMatrix, BetaResult, SortPolicy};
    pub use crate::config::AnalyticsConfig;
    pub use crate::diversification::{compute_diversification_metrics, DiversificationMetrics};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::performance::*;
    pub use crate::simulation::{
        box_muller, generate_returns, generate_returns_seeded, simulate_universe,
        SimulationParams,
    };

    pub use aurum_core::prelude::*;
}
