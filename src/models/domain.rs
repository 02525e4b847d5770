use crate::models::lenient;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A catalog listing as delivered by the catalog provider
///
/// Optional numeric attributes stay `None` when the catalog has no value;
/// scoring treats them as unscorable rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub location: String,
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    pub status: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Price in the smallest currency unit
    #[serde(default)]
    pub price: Option<i64>,
    /// Return on investment, in percent
    #[serde(default)]
    pub roi: Option<f64>,
    #[serde(rename = "areaSqft", default)]
    pub area_sqft: Option<f64>,
    #[serde(rename = "distanceFromHighway", default)]
    pub distance_from_highway: Option<f64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Listing {
    /// Both coordinates, or nothing
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

/// Non-negotiable constraints; a listing violating any present field is
/// excluded before scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_price_range"))]
pub struct MustHave {
    #[serde(default, deserialize_with = "lenient::non_blank")]
    pub location: Option<String>,
    #[serde(rename = "categoryId", default, deserialize_with = "lenient::integer")]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::non_blank")]
    pub status: Option<String>,
    #[serde(rename = "minPrice", default, deserialize_with = "lenient::number")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", default, deserialize_with = "lenient::number")]
    pub max_price: Option<f64>,
    #[serde(rename = "minRoi", default, deserialize_with = "lenient::number")]
    pub min_roi: Option<f64>,
    #[serde(rename = "minArea", default, deserialize_with = "lenient::number")]
    pub min_area: Option<f64>,
    #[serde(rename = "maxDistanceFromHighway", default, deserialize_with = "lenient::number")]
    pub max_distance_from_highway: Option<f64>,
}

fn validate_price_range(must_have: &MustHave) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (must_have.min_price, must_have.max_price) {
        if min > max {
            let mut err = ValidationError::new("price_range");
            err.message = Some(Cow::Borrowed(
                "minPrice must be less than or equal to maxPrice",
            ));
            return Err(err);
        }
    }
    Ok(())
}

/// Soft preferences; each present field activates one scoring criterion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Preferences {
    #[serde(default, deserialize_with = "lenient::non_blank")]
    pub location: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitude: Option<f64>,
    #[serde(rename = "locationRadiusKm", default, deserialize_with = "lenient::number")]
    pub location_radius_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub budget: Option<f64>,
    #[serde(rename = "roiPercent", default, deserialize_with = "lenient::number")]
    pub roi_percent: Option<f64>,
    #[serde(rename = "areaSqft", default, deserialize_with = "lenient::number")]
    pub area_sqft: Option<f64>,
    #[serde(rename = "maxDistanceFromHighway", default, deserialize_with = "lenient::number")]
    pub max_distance_from_highway: Option<f64>,
}

impl Preferences {
    /// Both coordinates, or nothing
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
    }
}

/// Scoring criterion that produced an explanation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Location,
    Price,
    Roi,
    Area,
    HighwayDistance,
}

/// One line of a score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub criterion: Criterion,
    pub reason: String,
    pub points: f64,
}

/// Outcome of scoring one listing against one preference set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    #[serde(rename = "maxPossible")]
    pub max_possible: f64,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u32,
    pub explanation: Vec<Explanation>,
}

/// Column-level constraint understood by the catalog provider
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    /// Case-insensitive substring of `location`
    LocationContains(String),
    CategoryEquals(i64),
    /// Case-insensitive equality on `status`
    StatusEquals(String),
    PriceAtLeast(f64),
    PriceAtMost(f64),
    RoiAtLeast(f64),
    AreaAtLeast(f64),
    HighwayDistanceAtMost(f64),
}

/// Catalog query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub constraints: Vec<ColumnConstraint>,
}

impl CatalogQuery {
    /// Translate must-have constraints into their column-filter form
    ///
    /// Every `MustHave` field has a column counterpart, so the catalog
    /// pre-filter selects exactly what the in-memory hard filter accepts.
    pub fn from_must_have(must_have: &MustHave) -> Self {
        let mut constraints = Vec::new();

        if let Some(location) = &must_have.location {
            constraints.push(ColumnConstraint::LocationContains(location.clone()));
        }
        if let Some(category_id) = must_have.category_id {
            constraints.push(ColumnConstraint::CategoryEquals(category_id));
        }
        if let Some(status) = &must_have.status {
            constraints.push(ColumnConstraint::StatusEquals(status.clone()));
        }
        if let Some(min) = must_have.min_price {
            constraints.push(ColumnConstraint::PriceAtLeast(min));
        }
        if let Some(max) = must_have.max_price {
            constraints.push(ColumnConstraint::PriceAtMost(max));
        }
        if let Some(min) = must_have.min_roi {
            constraints.push(ColumnConstraint::RoiAtLeast(min));
        }
        if let Some(min) = must_have.min_area {
            constraints.push(ColumnConstraint::AreaAtLeast(min));
        }
        if let Some(max) = must_have.max_distance_from_highway {
            constraints.push(ColumnConstraint::HighwayDistanceAtMost(max));
        }

        Self { constraints }
    }
}
