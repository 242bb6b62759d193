//! External optimization service.
//!
//! The frontier solver and the benchmark/inefficiency calculations run in a
//! separate service. These are the request and result shapes the dashboard
//! exchanges with it:
//! - [`FrontierRequest`] / [`EfficientFrontier`]
//! - [`BenchmarkRequest`] / [`BlendedBenchmark`]
//! - [`InefficiencyRequest`] / [`Inefficiency`]
//! - [`OptimalPortfolioRequest`] / [`OptimalPortfolio`]

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{TraitError, TraitResult};
use aurum_core::AssetId;

/// Default risk-free rate for Sharpe-based selection.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.03;

/// Default number of frontier points.
pub const DEFAULT_FRONTIER_POINTS: usize = 30;

/// Default deviation that flags an allocation as inefficient (3 points).
pub const DEFAULT_INEFFICIENCY_THRESHOLD: f64 = 0.03;

/// Risk floor used when dividing by frontier risk.
const MIN_RISK: f64 = 1e-10;

// =============================================================================
// UNIVERSE SELECTION
// =============================================================================

/// Which asset universe the optimizer may allocate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    /// Core public asset classes only.
    Core,
    /// Core plus private markets.
    CorePrivate,
    /// Every asset with capital market assumptions.
    #[default]
    Unconstrained,
}

/// Per-asset weight cap template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapsTemplate {
    /// Standard caps.
    #[default]
    Std,
    /// Tighter caps, more diversified portfolios.
    Tight,
    /// Looser caps.
    Loose,
}

// =============================================================================
// EFFICIENT FRONTIER
// =============================================================================

/// Request for an efficient frontier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierRequest {
    /// Asset universe.
    pub mode: OptimizationMode,
    /// Weight cap template.
    pub caps_template: CapsTemplate,
    /// Explicit asset list overriding `mode`.
    pub custom_assets: Option<Vec<AssetId>>,
    /// Number of frontier points.
    pub n_points: usize,
}

impl Default for FrontierRequest {
    fn default() -> Self {
        Self {
            mode: OptimizationMode::default(),
            caps_template: CapsTemplate::default(),
            custom_assets: None,
            n_points: DEFAULT_FRONTIER_POINTS,
        }
    }
}

/// Points on an efficient frontier, ordered by increasing risk.
///
/// `risks`, `returns` and `weights` are parallel vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficientFrontier {
    /// Annualized volatility of each point.
    pub risks: Vec<f64>,
    /// Expected annual return of each point.
    pub returns: Vec<f64>,
    /// Asset weights of each point.
    pub weights: Vec<BTreeMap<AssetId, f64>>,
    /// Assets in the optimized universe.
    pub assets: Vec<AssetId>,
    /// Number of points produced.
    pub n_portfolios: usize,
    /// Universe the frontier was built on.
    pub mode: OptimizationMode,
    /// Cap template the frontier was built with.
    pub caps_template: CapsTemplate,
}

impl EfficientFrontier {
    /// Number of usable points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.risks.len().min(self.returns.len())
    }

    /// Returns true if the frontier has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sharpe ratio of the point at `index`.
    #[must_use]
    pub fn sharpe_ratio(&self, index: usize, risk_free_rate: f64) -> Option<f64> {
        let ret = self.returns.get(index)?;
        let risk = self.risks.get(index)?;
        Some((ret - risk_free_rate) / risk.max(MIN_RISK))
    }

    /// Picks a point according to the request.
    ///
    /// - With a target return: the lowest-risk point reaching it, or the
    ///   highest-return point if none does.
    /// - With a target risk: the highest-return point within it, or the
    ///   lowest-risk point if none is.
    /// - Otherwise: the maximum Sharpe ratio point.
    ///
    /// Ties go to the earlier point. Returns `None` for an empty frontier.
    #[must_use]
    pub fn select(&self, request: &OptimalPortfolioRequest) -> Option<OptimalPortfolio> {
        let n = self.len();
        let points = 0..n;
        let rf = request.risk_free_rate;

        let (index, selection_method) = if let Some(target) = request.target_return {
            let index = first_min_by(points.clone().filter(|&i| self.returns[i] >= target), |i| {
                self.risks[i]
            })
            .or_else(|| first_max_by(points, |i| self.returns[i]))?;
            (index, SelectionMethod::TargetReturn(target))
        } else if let Some(target) = request.target_risk {
            let index = first_max_by(points.clone().filter(|&i| self.risks[i] <= target), |i| {
                self.returns[i]
            })
            .or_else(|| first_min_by(points, |i| self.risks[i]))?;
            (index, SelectionMethod::TargetRisk(target))
        } else {
            let index = first_max_by(points, |i| self.sharpe_ratio(i, rf).unwrap_or(f64::MIN))?;
            (index, SelectionMethod::MaxSharpe)
        };

        Some(OptimalPortfolio {
            index,
            expected_return: self.returns[index],
            risk: self.risks[index],
            sharpe_ratio: self.sharpe_ratio(index, rf)?,
            weights: self.weights.get(index).cloned().unwrap_or_default(),
            selection_method,
        })
    }
}

fn first_max_by(indices: impl Iterator<Item = usize>, key: impl Fn(usize) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in indices {
        let value = key(i);
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

fn first_min_by(indices: impl Iterator<Item = usize>, key: impl Fn(usize) -> f64) -> Option<usize> {
    first_max_by(indices, |i| -key(i))
}

// =============================================================================
// BLENDED BENCHMARK
// =============================================================================

/// Request for a two-sleeve equity / fixed income benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkRequest {
    /// Equity index name.
    pub equity_type: String,
    /// Fixed income index name.
    pub fixed_income_type: String,
    /// Equity weight in [0, 1]; fixed income takes the rest.
    pub equity_allocation: f64,
}

impl Default for BenchmarkRequest {
    fn default() -> Self {
        Self {
            equity_type: "GLOBAL".to_string(),
            fixed_income_type: "GLOBAL AGGREGATE".to_string(),
            equity_allocation: 0.60,
        }
    }
}

impl BenchmarkRequest {
    /// Fixed income weight.
    #[must_use]
    pub fn fixed_income_allocation(&self) -> f64 {
        1.0 - self.equity_allocation
    }

    /// Checks that the equity weight lies in [0, 1].
    pub fn validate(&self) -> TraitResult<()> {
        if !(0.0..=1.0).contains(&self.equity_allocation) {
            return Err(TraitError::InvalidInput(format!(
                "equity_allocation must be in [0, 1], got {}",
                self.equity_allocation
            )));
        }
        Ok(())
    }
}

/// One sleeve of a blended benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSleeve {
    /// Index name.
    #[serde(rename = "type")]
    pub index: String,
    /// Expected annual return.
    #[serde(rename = "return")]
    pub expected_return: f64,
    /// Annualized volatility.
    pub risk: f64,
    /// Weight in the blend.
    pub allocation: f64,
}

/// Blended two-sleeve benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedBenchmark {
    /// Weighted expected return.
    pub blended_return: f64,
    /// Volatility of the blend given the sleeve correlation.
    pub blended_risk: f64,
    /// Equity sleeve.
    pub equity: BenchmarkSleeve,
    /// Fixed income sleeve.
    pub fixed_income: BenchmarkSleeve,
    /// Correlation between the sleeves.
    pub correlation: f64,
}

// =============================================================================
// INEFFICIENCY DETECTION
// =============================================================================

/// Current and proposed weight of one asset class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationDelta {
    /// Current weight.
    pub current: f64,
    /// Proposed weight.
    pub proposed: f64,
}

/// Request to flag allocations that deviate from a benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InefficiencyRequest {
    /// Asset class to current/proposed weights.
    pub holdings: BTreeMap<String, AllocationDelta>,
    /// Asset class to benchmark weight.
    pub benchmark_allocations: BTreeMap<String, f64>,
    /// Minimum absolute deviation to flag.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_INEFFICIENCY_THRESHOLD
}

impl InefficiencyRequest {
    /// Creates a request with the default threshold.
    #[must_use]
    pub fn new(
        holdings: BTreeMap<String, AllocationDelta>,
        benchmark_allocations: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            holdings,
            benchmark_allocations,
            threshold: DEFAULT_INEFFICIENCY_THRESHOLD,
        }
    }

    /// Sets the threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// A flagged allocation. Percentages are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inefficiency {
    /// Asset class.
    pub asset: String,
    /// Risk bucket of the asset class (may be empty).
    pub bucket: String,
    /// Current weight, %.
    pub current_pct: f64,
    /// Proposed weight, %.
    pub proposed_pct: f64,
    /// Benchmark weight, %.
    pub benchmark_pct: f64,
    /// Proposed minus current, %.
    pub vs_current_delta: f64,
    /// Proposed minus benchmark, %.
    pub vs_benchmark_delta: f64,
}

// =============================================================================
// OPTIMAL PORTFOLIO
// =============================================================================

/// Request for a single point on the frontier.
///
/// `target_return` takes precedence over `target_risk`; with neither the
/// maximum Sharpe point is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimalPortfolioRequest {
    /// Minimum acceptable expected return.
    pub target_return: Option<f64>,
    /// Maximum acceptable risk.
    pub target_risk: Option<f64>,
    /// Risk-free rate for the Sharpe ratio.
    pub risk_free_rate: f64,
    /// Asset universe.
    pub mode: OptimizationMode,
    /// Weight cap template.
    pub caps_template: CapsTemplate,
}

impl Default for OptimalPortfolioRequest {
    fn default() -> Self {
        Self {
            target_return: None,
            target_risk: None,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            mode: OptimizationMode::default(),
            caps_template: CapsTemplate::default(),
        }
    }
}

impl OptimalPortfolioRequest {
    /// Frontier request covering the same universe and caps.
    #[must_use]
    pub fn frontier_request(&self) -> FrontierRequest {
        FrontierRequest {
            mode: self.mode,
            caps_template: self.caps_template,
            ..FrontierRequest::default()
        }
    }
}

/// How a frontier point was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "target", rename_all = "snake_case")]
pub enum SelectionMethod {
    /// Highest Sharpe ratio.
    MaxSharpe,
    /// Lowest risk reaching a return target.
    TargetReturn(f64),
    /// Highest return within a risk target.
    TargetRisk(f64),
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxSharpe => write!(f, "max_sharpe"),
            Self::TargetReturn(t) => write!(f, "target_return={t}"),
            Self::TargetRisk(t) => write!(f, "target_risk={t}"),
        }
    }
}

/// A selected frontier point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalPortfolio {
    /// Position on the frontier.
    pub index: usize,
    /// Expected annual return.
    #[serde(rename = "return")]
    pub expected_return: f64,
    /// Annualized volatility.
    pub risk: f64,
    /// Sharpe ratio at the requested risk-free rate.
    pub sharpe_ratio: f64,
    /// Asset weights.
    pub weights: BTreeMap<AssetId, f64>,
    /// Selection rule that produced this point.
    pub selection_method: SelectionMethod,
}

// =============================================================================
// SERVICE
// =============================================================================

/// Trait for the external optimization service.
#[async_trait]
pub trait OptimizationService: Send + Sync {
    /// Computes an efficient frontier.
    async fn frontier(&self, request: &FrontierRequest) -> TraitResult<EfficientFrontier>;

    /// Computes a blended equity / fixed income benchmark.
    async fn benchmark(&self, request: &BenchmarkRequest) -> TraitResult<BlendedBenchmark>;

    /// Flags allocations deviating from current or benchmark weights.
    async fn inefficiencies(&self, request: &InefficiencyRequest)
        -> TraitResult<Vec<Inefficiency>>;

    /// Selects one frontier point.
    ///
    /// The default implementation fetches the frontier and applies
    /// [`EfficientFrontier::select`].
    async fn optimal_portfolio(
        &self,
        request: &OptimalPortfolioRequest,
    ) -> TraitResult<OptimalPortfolio> {
        let frontier = self.frontier(&request.frontier_request()).await?;
        frontier
            .select(request)
            .ok_or_else(|| TraitError::not_found("empty frontier"))
    }
}
