use super::*;

fn district(state: &str, district: &str, lat: f64, lon: f64) -> LocationEntry {
    LocationEntry {
        state: state.to_owned(),
        district: district.to_owned(),
        latitude: lat,
        longitude: lon,
    }
}

fn market(state: &str, district: &str, name: &str, coords: Option<(f64, f64)>) -> MarketEntry {
    MarketEntry {
        state: state.to_owned(),
        district: district.to_owned(),
        market: name.to_owned(),
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
    }
}

fn punjab_districts() -> Vec<LocationEntry> {
    vec![
        district("Punjab", "Ludhiana", 30.9010, 75.8573),
        district("Punjab", "Amritsar", 31.6340, 74.8723),
        district("Haryana", "Ambala", 30.3782, 76.7767),
    ]
}

#[tokio::test]
async fn empty_datasets_resolve_to_default_region() {
    // Availability over correctness: with no reference data the resolver
    // answers with the default region rather than failing. A Mumbai
    // coordinate "resolving" to Ludhiana is wrong but deliberate.
    let resolver = LocationResolver::new(Vec::new(), Vec::new());
    let resolved = resolver.resolve(GeoPoint::new(19.0760, 72.8777)).await;

    assert_eq!(resolved.state, DEFAULT_STATE);
    assert_eq!(resolved.district, DEFAULT_DISTRICT);
    assert!(
        !resolved.candidates.is_empty(),
        "default resolution must still offer candidates"
    );
}

#[tokio::test]
async fn nearest_district_search_spans_all_states() {
    // The point sits in Haryana; the resolver must not pre-filter by any
    // assumed state.
    let resolver = LocationResolver::new(punjab_districts(), Vec::new());
    let resolved = resolver.resolve(GeoPoint::new(30.40, 76.80)).await;

    assert_eq!(resolved.state, "Haryana");
    assert_eq!(resolved.district, "Ambala");
}

#[tokio::test]
async fn markets_are_ranked_by_distance() {
    let markets = vec![
        market("Punjab", "Ludhiana", "Ludhiana", Some((30.9010, 75.8573))),
        market("Punjab", "Ludhiana", "Khanna", Some((30.7057, 76.2221))),
    ];
    let resolver = LocationResolver::new(punjab_districts(), markets);

    // Point east of Ludhiana city: Khanna is the closer market.
    let resolved = resolver.resolve(GeoPoint::new(30.80, 76.10)).await;
    assert_eq!(resolved.district, "Ludhiana");
    assert_eq!(resolved.candidates[0].market, "Khanna");
    assert_eq!(resolved.candidates[0].rank, 0);
    assert_eq!(resolved.candidates[1].market, "Ludhiana");
    assert_eq!(resolved.candidates[1].rank, 1);
    assert!(resolved.candidates[0].distance_km.unwrap() < resolved.candidates[1].distance_km.unwrap());
}

#[tokio::test]
async fn coordinate_less_markets_rank_last_in_data_order() {
    let markets = vec![
        market("Punjab", "Ludhiana", "Sahnewal", None),
        market("Punjab", "Ludhiana", "Khanna", Some((30.7057, 76.2221))),
        market("Punjab", "Ludhiana", "Jagraon", None),
    ];
    let resolver = LocationResolver::new(punjab_districts(), markets);
    let resolved = resolver.resolve(GeoPoint::new(30.9010, 75.8573)).await;

    let names: Vec<&str> = resolved
        .candidates
        .iter()
        .map(|c| c.market.as_str())
        .collect();
    assert_eq!(names, ["Khanna", "Sahnewal", "Jagraon"]);
    assert!(resolved.candidates[1].distance_km.is_none());
    assert!(resolved.candidates[2].distance_km.is_none());
}

#[tokio::test]
async fn district_without_markets_falls_back_to_major_market_table() {
    // Amritsar district resolves, but the market dataset has nothing for
    // it, so the state's major markets fill in.
    let markets = vec![market(
        "Punjab",
        "Ludhiana",
        "Khanna",
        Some((30.7057, 76.2221)),
    )];
    let resolver = LocationResolver::new(punjab_districts(), markets);
    let resolved = resolver.resolve(GeoPoint::new(31.6340, 74.8723)).await;

    assert_eq!(resolved.district, "Amritsar");
    assert_eq!(resolved.candidates.len(), 5);
    assert_eq!(resolved.candidates[0].market, "Ludhiana");
    assert!(resolved
        .candidates
        .iter()
        .any(|c| c.market == "Amritsar" && c.district == "Amritsar"));
}

#[tokio::test]
async fn candidate_ranks_are_sequential() {
    let markets = vec![
        market("Punjab", "Ludhiana", "Ludhiana", Some((30.9010, 75.8573))),
        market("Punjab", "Ludhiana", "Sahnewal", None),
    ];
    let resolver = LocationResolver::new(punjab_districts(), markets);
    let resolved = resolver.resolve(GeoPoint::new(30.9, 75.9)).await;

    for (i, candidate) in resolved.candidates.iter().enumerate() {
        assert_eq!(candidate.rank, i);
    }
}
