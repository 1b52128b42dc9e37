//! Static crop-season calendar.
//!
//! Purely informational fallback payload attached to a lookup result when
//! no price data could be found anywhere; never derived from scraped data.

use serde::{Deserialize, Serialize};

/// Seasonal calendar for one crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalInfo {
    pub growing_season: String,
    pub harvesting_period: String,
    pub expected_next_harvest: String,
}

struct CropSeason {
    crop: &'static str,
    growing_season: &'static str,
    harvesting_period: &'static str,
    expected_next_harvest: &'static str,
}

/// Common crop seasons in India, keyed by lowercased crop name.
const CROP_SEASONS: &[CropSeason] = &[
    CropSeason {
        crop: "rice",
        growing_season: "Kharif (June-July to October-November)",
        harvesting_period: "September-December",
        expected_next_harvest: "October-November",
    },
    CropSeason {
        crop: "wheat",
        growing_season: "Rabi (October-December to March-April)",
        harvesting_period: "February-May",
        expected_next_harvest: "March-April",
    },
    CropSeason {
        crop: "maize",
        growing_season: "Both Kharif and Rabi seasons",
        harvesting_period: "September-October (Kharif), February-March (Rabi)",
        expected_next_harvest: "Varies by region",
    },
    CropSeason {
        crop: "potato",
        growing_season: "Rabi (October-November to February-March)",
        harvesting_period: "January-March",
        expected_next_harvest: "January-February",
    },
    CropSeason {
        crop: "onion",
        growing_season: "Kharif, late Kharif, and Rabi",
        harvesting_period: "Year-round in different regions",
        expected_next_harvest: "Varies by region",
    },
    CropSeason {
        crop: "tomato",
        growing_season: "Year-round in different regions",
        harvesting_period: "Varies by region",
        expected_next_harvest: "Varies by region",
    },
    CropSeason {
        crop: "apple",
        growing_season: "Spring (March-April)",
        harvesting_period: "July-October",
        expected_next_harvest: "August-September",
    },
    CropSeason {
        crop: "strawberry",
        growing_season: "October-November",
        harvesting_period: "January-March",
        expected_next_harvest: "January-February",
    },
];

/// Look up the seasonal calendar for a crop. Matching is case-insensitive
/// on the trimmed crop name; unknown crops return `None`.
#[must_use]
pub fn crop_seasons(commodity: &str) -> Option<SeasonalInfo> {
    let needle = commodity.trim().to_lowercase();
    CROP_SEASONS
        .iter()
        .find(|entry| entry.crop == needle)
        .map(|entry| SeasonalInfo {
            growing_season: entry.growing_season.to_owned(),
            harvesting_period: entry.harvesting_period.to_owned(),
            expected_next_harvest: entry.expected_next_harvest.to_owned(),
        })
}
