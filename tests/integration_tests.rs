// Integration tests for the recommendation pipeline

use async_trait::async_trait;
use propmatch::core::{distance::haversine_distance, find_matches, scoring::score_listing, PageRequest};
use propmatch::models::{
    CatalogQuery, Coordinates, Criterion, Listing, MustHave, Preferences, RecommendationRequest,
};
use propmatch::services::{
    CatalogError, GeocodeError, Geocoder, InMemoryCatalog, ListingCatalog, RecommendError, Recommender,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Catalog wrapper that records every query it receives
struct RecordingCatalog {
    inner: InMemoryCatalog,
    calls: AtomicUsize,
    last_query: Mutex<Option<CatalogQuery>>,
}

impl RecordingCatalog {
    fn new(listings: Vec<Listing>) -> Self {
        Self {
            inner: InMemoryCatalog::new(listings),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ListingCatalog for RecordingCatalog {
    async fn find(&self, query: &CatalogQuery) -> Result<Vec<Listing>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.inner.find(query).await
    }
}

/// Catalog that ignores constraints, standing in for a drifted pre-filter
struct UnfilteredCatalog(Vec<Listing>);

#[async_trait]
impl ListingCatalog for UnfilteredCatalog {
    async fn find(&self, _query: &CatalogQuery) -> Result<Vec<Listing>, CatalogError> {
        Ok(self.0.clone())
    }
}

struct CountingGeocoder {
    answer: Option<Coordinates>,
    calls: AtomicUsize,
}

#[async_trait]
impl Geocoder for CountingGeocoder {
    async fn resolve(&self, _address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

struct UnconfiguredGeocoder;

#[async_trait]
impl Geocoder for UnconfiguredGeocoder {
    async fn resolve(&self, _address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        Err(GeocodeError::NotConfigured)
    }
}

fn kathmandu_listing() -> Listing {
    Listing {
        id: 1,
        title: "House in Baneshwor".to_string(),
        location: "Kathmandu".to_string(),
        category_id: 1,
        status: "available".to_string(),
        latitude: None,
        longitude: None,
        price: Some(5_000_000),
        roi: None,
        area_sqft: Some(1200.0),
        distance_from_highway: Some(500.0),
        created_at: None,
    }
}

fn kathmandu_preferences() -> Preferences {
    Preferences {
        location: Some("Kathmandu".to_string()),
        budget: Some(5_000_000.0),
        area_sqft: Some(1200.0),
        max_distance_from_highway: Some(1000.0),
        ..Default::default()
    }
}

#[test]
fn test_kathmandu_text_scenario() {
    let result = score_listing(&kathmandu_listing(), &kathmandu_preferences());

    let points: Vec<(Criterion, f64)> = result.explanation.iter().map(|e| (e.criterion, e.points)).collect();
    assert_eq!(
        points,
        vec![
            (Criterion::Location, 25.0),
            (Criterion::Price, 30.0),
            (Criterion::Area, 15.0),
            (Criterion::HighwayDistance, 15.0),
        ]
    );
    assert_eq!(result.score, 85.0);
    assert_eq!(result.max_possible, 85.0);
    assert_eq!(result.match_percentage, 100);
}

#[test]
fn test_twenty_km_away_scores_zero_location() {
    let origin = (27.7, 85.3);
    let listing_lat = origin.0 + 20.0 / 111.195;
    let distance = haversine_distance(origin.0, origin.1, listing_lat, origin.1);
    assert!((distance - 20.0).abs() < 0.1, "got {}", distance);

    let mut listing = kathmandu_listing();
    listing.latitude = Some(listing_lat);
    listing.longitude = Some(origin.1);

    let preferences = Preferences {
        latitude: Some(origin.0),
        longitude: Some(origin.1),
        location_radius_km: Some(10.0),
        ..Default::default()
    };

    let result = score_listing(&listing, &preferences);
    assert_eq!(result.explanation.len(), 1);
    assert_eq!(result.explanation[0].points, 0.0);
    assert_eq!(result.score, 0.0);
}

#[test]
fn test_min_price_excludes_listing() {
    let must_have = MustHave {
        min_price: Some(6_000_000.0),
        ..Default::default()
    };

    let result = find_matches(
        vec![kathmandu_listing()],
        &must_have,
        &kathmandu_preferences(),
        PageRequest::default(),
    );
    assert!(result.matches.is_empty());
    assert_eq!(result.pagination.total, 0);
}

#[tokio::test]
async fn test_inverted_price_range_never_reaches_catalog() {
    let catalog = Arc::new(RecordingCatalog::new(vec![kathmandu_listing()]));
    let recommender = Recommender::new(catalog.clone(), Arc::new(UnconfiguredGeocoder));

    let request = RecommendationRequest {
        must_have: MustHave {
            min_price: Some(10.0),
            max_price: Some(5.0),
            ..Default::default()
        },
        ..Default::default()
    };

    let err = recommender.recommend(request).await.unwrap_err();
    assert!(matches!(err, RecommendError::Validation(_)));
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_end_to_end_ranking() {
    let mut cheaper = kathmandu_listing();
    cheaper.id = 2;
    cheaper.price = Some(4_000_000);

    let mut elsewhere = kathmandu_listing();
    elsewhere.id = 3;
    elsewhere.location = "Pokhara".to_string();

    let mut sold = kathmandu_listing();
    sold.id = 4;
    sold.status = "Sold".to_string();

    let catalog = Arc::new(RecordingCatalog::new(vec![elsewhere, cheaper, sold, kathmandu_listing()]));
    let recommender = Recommender::new(catalog.clone(), Arc::new(UnconfiguredGeocoder));

    let request = RecommendationRequest {
        must_have: MustHave {
            status: Some("AVAILABLE".to_string()),
            ..Default::default()
        },
        preferences: kathmandu_preferences(),
        ..Default::default()
    };

    let response = recommender.recommend(request).await.unwrap();

    let ids: Vec<i64> = response.data.iter().map(|m| m.listing.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(response.data[0].score, 85.0);
    assert_eq!(response.data[0].match_percentage, 100);
    // 25 + 24 + 15 + 15
    assert_eq!(response.data[1].score, 79.0);
    assert_eq!(response.data[2].score, 60.0);
    assert_eq!(response.pagination.total, 3);
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);

    let query = catalog.last_query.lock().unwrap().clone().unwrap();
    assert_eq!(query, CatalogQuery::from_must_have(&MustHave {
        status: Some("AVAILABLE".to_string()),
        ..Default::default()
    }));
}

#[tokio::test]
async fn test_hard_filter_still_applies_after_catalog() {
    let mut sold = kathmandu_listing();
    sold.id = 9;
    sold.status = "sold".to_string();

    let recommender = Recommender::new(
        Arc::new(UnfilteredCatalog(vec![sold, kathmandu_listing()])),
        Arc::new(UnconfiguredGeocoder),
    );

    let request = RecommendationRequest {
        must_have: MustHave {
            status: Some("available".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    let response = recommender.recommend(request).await.unwrap();
    let ids: Vec<i64> = response.data.iter().map(|m| m.listing.id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_supplied_coordinates_skip_geocoding() {
    let geocoder = Arc::new(CountingGeocoder {
        answer: Some(Coordinates::new(0.0, 0.0)),
        calls: AtomicUsize::new(0),
    });
    let recommender = Recommender::new(
        Arc::new(RecordingCatalog::new(vec![kathmandu_listing()])),
        geocoder.clone(),
    );

    let request = RecommendationRequest {
        preferences: Preferences {
            location: Some("Kathmandu".to_string()),
            latitude: Some(27.7),
            longitude: Some(85.3),
            ..Default::default()
        },
        ..Default::default()
    };

    let response = recommender.recommend(request).await.unwrap();
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    // Listing has no coordinates, so the text fallback decides
    assert_eq!(response.data[0].score, 25.0);
    assert!(response.data[0].explanation[0].reason.contains("fallback text matched"));
}

#[tokio::test]
async fn test_geocoder_without_result_keeps_text_mode() {
    let geocoder = Arc::new(CountingGeocoder {
        answer: None,
        calls: AtomicUsize::new(0),
    });
    let recommender = Recommender::new(
        Arc::new(RecordingCatalog::new(vec![kathmandu_listing()])),
        geocoder.clone(),
    );

    let response = recommender
        .recommend(RecommendationRequest {
            preferences: kathmandu_preferences(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(response.data[0].explanation[0].reason, "Location matches \"Kathmandu\"");
    assert_eq!(response.data[0].score, 85.0);
}

#[tokio::test]
async fn test_request_parsed_from_formatted_json() {
    let request: RecommendationRequest = serde_json::from_value(serde_json::json!({
        "mustHave": { "minPrice": "4,500,000", "maxPrice": "5,500,000.00", "minArea": "oops" },
        "preferences": { "budget": "5,000,000", "areaSqft": "1,200" },
        "limit": "2"
    }))
    .unwrap();

    assert_eq!(request.must_have.min_area, None);

    let recommender = Recommender::new(
        Arc::new(RecordingCatalog::new(vec![kathmandu_listing()])),
        Arc::new(UnconfiguredGeocoder),
    );

    let response = recommender.recommend(request).await.unwrap();
    assert_eq!(response.pagination.limit, 2);
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].score, 45.0);
    assert_eq!(response.data[0].match_percentage, 100);
}
