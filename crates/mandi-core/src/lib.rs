pub mod app_config;
pub mod config;
pub mod seasons;
pub mod source;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use seasons::{crop_seasons, SeasonalInfo};
pub use source::{PriceSource, SourceError};
pub use types::{PriceQuery, PriceQueryResult, PriceRecord, QueryMode};
