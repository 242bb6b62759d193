//! # Aurum Core
//!
//! Core types shared by the Aurum portfolio analytics crates.
//!
//! This crate provides the foundational building blocks used throughout Aurum:
//!
//! - **Types**: `ReturnSeries`, `ReturnUniverse`, `Periodicity`, ESG score tables
//! - **Identifiers**: Validated `Isin` and `Cusip` security identifiers
//! - **Parallelism**: `ParallelPolicy` and order-preserving parallel helpers
//!
//! ## Design Philosophy
//!
//! - **Plain data**: Every type is a transient value owned by the caller
//! - **No ambient state**: Lookup tables are passed explicitly, never global
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use aurum_core::prelude::*;
//!
//! let series = ReturnSeries::new(vec![0.01, -0.02, 0.015]);
//! assert_eq!(series.len(), 3);
//! assert_eq!(Periodicity::Monthly.periods_per_year(), 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod identifiers;
pub mod parallel;
pub mod types;

pub use error::{CoreError, CoreResult, IdentifierError};
pub use identifiers::{Cusip, Isin, SecurityId};
pub use parallel::{maybe_parallel_filter_map, maybe_parallel_map, ParallelPolicy};
pub use types::{
    AssetId, EsgScoreRecord, EsgScoreTables, Periodicity, ReturnSeries, ReturnUniverse,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult, IdentifierError};
    pub use crate::identifiers::{Cusip, Isin, SecurityId};
    pub use crate::parallel::ParallelPolicy;
    pub use crate::types::{
        AssetId, EsgScoreRecord, EsgScoreTables, Periodicity, ReturnSeries, ReturnUniverse,
    };
}
