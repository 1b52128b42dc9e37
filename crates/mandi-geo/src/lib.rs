pub mod data;
pub mod distance;
pub mod error;
pub mod geocode;
pub mod markets;
pub mod resolver;

pub use data::{load_districts, load_markets, LocationEntry, MarketEntry};
pub use distance::{haversine_km, nearest, GeoPoint};
pub use error::GeoError;
pub use geocode::{normalize_district_name, ReverseGeocoder};
pub use markets::{major_markets, MajorMarket};
pub use resolver::{LocationResolver, QueryCandidate, ResolvedLocation};
