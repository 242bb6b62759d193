//! # Aurum Traits
//!
//! Boundaries between the analytics core and its external collaborators.
//!
//! This crate contains ONLY trait definitions and the data shapes that cross
//! them. Implementations live in extension crates (`aurum-ext-file`) or in
//! the outer service layer.
//!
//! ## Module Structure
//!
//! - [`time_series`]: Aligned periodic return series per asset and benchmark
//! - [`esg`]: Loaders for the ISIN- and CUSIP-keyed ESG score tables
//! - [`optimization`]: The external optimization service (frontier,
//!   blended benchmark, inefficiency flags, optimal portfolio selection)
//!
//! ## Dependency Injection
//!
//! Callers hold collaborators as trait objects:
//!
//! ```ignore
//! let provider: Arc<dyn TimeSeriesProvider> = Arc::new(CsvReturnSource::open(path)?);
//! let universe = provider.universe(&assets).await?;
//! let betas = compute_beta_matrix(&universe, "MSCI ACWI", &config)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod esg;
pub mod optimization;
pub mod time_series;

// Re-export commonly used types
pub use error::{TraitError, TraitResult};
pub use esg::EsgScoreSource;
pub use optimization::{
    AllocationDelta, BenchmarkRequest, BenchmarkSleeve, BlendedBenchmark, CapsTemplate,
    EfficientFrontier, FrontierRequest, Inefficiency, InefficiencyRequest, OptimalPortfolio,
    OptimalPortfolioRequest, OptimizationMode, OptimizationService, SelectionMethod,
};
pub use time_series::TimeSeriesProvider;
