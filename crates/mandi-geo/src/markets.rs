//! Static per-state major-market table.
//!
//! Last-resort fallback when district-level markets yield no data. Kept
//! hardcoded for parity with the upstream dataset; swapping in a
//! data-driven source only touches this module.

/// One well-known market and the district it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorMarket {
    pub district: &'static str,
    pub market: &'static str,
}

const PUNJAB: &[MajorMarket] = &[
    MajorMarket {
        district: "Ludhiana",
        market: "Ludhiana",
    },
    MajorMarket {
        district: "Amritsar",
        market: "Amritsar",
    },
    MajorMarket {
        district: "Patiala",
        market: "Patiala",
    },
    MajorMarket {
        district: "Jalandhar",
        market: "Jalandhar",
    },
    MajorMarket {
        district: "Bathinda",
        market: "Bathinda",
    },
];

const HARYANA: &[MajorMarket] = &[
    MajorMarket {
        district: "Karnal",
        market: "Karnal",
    },
    MajorMarket {
        district: "Ambala",
        market: "Ambala",
    },
    MajorMarket {
        district: "Hisar",
        market: "Hisar",
    },
    MajorMarket {
        district: "Gurugram",
        market: "Gurugram",
    },
    MajorMarket {
        district: "Kurukshetra",
        market: "Kurukshetra",
    },
];

const UTTAR_PRADESH: &[MajorMarket] = &[
    MajorMarket {
        district: "Lucknow",
        market: "Lucknow",
    },
    MajorMarket {
        district: "Kanpur",
        market: "Kanpur",
    },
    MajorMarket {
        district: "Varanasi",
        market: "Varanasi",
    },
    MajorMarket {
        district: "Agra",
        market: "Agra",
    },
    MajorMarket {
        district: "Meerut",
        market: "Meerut",
    },
];

const HIMACHAL_PRADESH: &[MajorMarket] = &[
    MajorMarket {
        district: "Shimla",
        market: "Shimla",
    },
    MajorMarket {
        district: "Solan",
        market: "Solan",
    },
    MajorMarket {
        district: "Kangra",
        market: "Dharamshala",
    },
    MajorMarket {
        district: "Kullu",
        market: "Kullu",
    },
    MajorMarket {
        district: "Mandi",
        market: "Mandi",
    },
];

const DEFAULT: &[MajorMarket] = &[MajorMarket {
    district: "Ludhiana",
    market: "Ludhiana",
}];

/// Major agricultural markets for a state, in fallback priority order.
/// Unknown states get the single-entry default list.
#[must_use]
pub fn major_markets(state: &str) -> &'static [MajorMarket] {
    match state {
        "Punjab" => PUNJAB,
        "Haryana" => HARYANA,
        "Uttar Pradesh" => UTTAR_PRADESH,
        "Himachal Pradesh" => HIMACHAL_PRADESH,
        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punjab_leads_with_ludhiana() {
        let markets = major_markets("Punjab");
        assert_eq!(markets.len(), 5);
        assert_eq!(markets[0].market, "Ludhiana");
    }

    #[test]
    fn kangra_market_is_dharamshala() {
        // District and market names are not always the same word.
        let markets = major_markets("Himachal Pradesh");
        assert!(markets
            .iter()
            .any(|m| m.district == "Kangra" && m.market == "Dharamshala"));
    }

    #[test]
    fn unknown_state_gets_default_list() {
        let markets = major_markets("Atlantis");
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].market, "Ludhiana");
    }
}
