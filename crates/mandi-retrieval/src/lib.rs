pub mod engine;
pub mod multi;
pub mod select;

pub use engine::{EngineConfig, RetrievalEngine};
pub use multi::{prices_for_location, DEFAULT_COMMODITIES};
pub use select::{select_latest, REPORT_DATE_FMT};
