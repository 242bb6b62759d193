//! Domain types for the Aurum analytics library.

mod esg;
mod periodicity;
mod series;

pub use esg::{EsgScoreRecord, EsgScoreTables, MAX_ESG_SCORE};
pub use periodicity::Periodicity;
pub use series::{AssetId, ReturnSeries, ReturnUniverse};
