use crate::core::{
    distance::distance_between,
    filters::contains_ignore_case,
    numeric::{attainment, match_percentage, overshoot_decay, round2, symmetric_decay},
};
use crate::models::{Coordinates, Criterion, Explanation, Listing, Preferences, ScoreResult};

/// Search radius used when preferences give none (or a non-positive one)
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

impl Criterion {
    /// Points available for this criterion; all five sum to 100
    pub const fn weight(self) -> f64 {
        match self {
            Criterion::Location => 25.0,
            Criterion::Price => 30.0,
            Criterion::Roi => 15.0,
            Criterion::Area => 15.0,
            Criterion::HighwayDistance => 15.0,
        }
    }
}

/// How the location criterion is evaluated for one preference set
///
/// Resolved once per scoring call. Coordinates win over text when both are
/// given; the text is then only a fallback for listings without coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationMode<'a> {
    Geo {
        origin: Coordinates,
        radius_km: f64,
        fallback_text: Option<&'a str>,
    },
    Text(&'a str),
    Unused,
}

impl<'a> LocationMode<'a> {
    pub fn resolve(preferences: &'a Preferences) -> Self {
        let text = preferences
            .location
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match (preferences.coordinates(), text) {
            (Some(origin), fallback_text) => LocationMode::Geo {
                origin,
                radius_km: preferences
                    .location_radius_km
                    .filter(|r| *r > 0.0)
                    .unwrap_or(DEFAULT_RADIUS_KM),
                fallback_text,
            },
            (None, Some(text)) => LocationMode::Text(text),
            (None, None) => LocationMode::Unused,
        }
    }
}

/// Score a listing against a buyer's preferences
///
/// Criteria are evaluated in a fixed order (location, price, roi, area,
/// highway distance) and each active one yields exactly one explanation
/// entry. Points are rounded per criterion before summing.
pub fn score_listing(listing: &Listing, preferences: &Preferences) -> ScoreResult {
    let entries = [
        location_entry(listing, LocationMode::resolve(preferences)),
        price_entry(listing, preferences.budget),
        roi_entry(listing, preferences.roi_percent),
        area_entry(listing, preferences.area_sqft),
        highway_entry(listing, preferences.max_distance_from_highway),
    ];

    let explanation: Vec<Explanation> = entries.into_iter().flatten().collect();

    let max_possible: f64 = explanation.iter().map(|e| e.criterion.weight()).sum();
    let score = round2(explanation.iter().map(|e| e.points).sum());

    ScoreResult {
        score,
        max_possible,
        match_percentage: match_percentage(score, max_possible),
        explanation,
    }
}

fn entry(criterion: Criterion, reason: String, fraction: f64) -> Explanation {
    Explanation {
        criterion,
        reason,
        points: round2(criterion.weight() * fraction),
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

fn location_entry(listing: &Listing, mode: LocationMode<'_>) -> Option<Explanation> {
    let (reason, fraction) = match mode {
        LocationMode::Unused => return None,
        LocationMode::Text(text) => {
            if contains_ignore_case(&listing.location, text) {
                (format!("Location matches \"{}\"", text), 1.0)
            } else {
                (format!("Location does not match \"{}\"", text), 0.0)
            }
        }
        LocationMode::Geo { origin, radius_km, fallback_text } => {
            match (listing.coordinates(), fallback_text) {
                (Some(position), _) => {
                    let distance_km = distance_between(origin, position);
                    (
                        format!(
                            "{:.2} km from preferred location (radius {} km)",
                            distance_km, radius_km
                        ),
                        (1.0 - distance_km / radius_km).max(0.0),
                    )
                }
                (None, Some(text)) => {
                    if contains_ignore_case(&listing.location, text) {
                        (
                            format!("No listing coordinates; fallback text matched \"{}\"", text),
                            1.0,
                        )
                    } else {
                        (
                            format!("No listing coordinates; fallback text did not match \"{}\"", text),
                            0.0,
                        )
                    }
                }
                (None, None) => (
                    "No listing coordinates and no location text; geo-scoring impossible".to_string(),
                    0.0,
                ),
            }
        }
    };

    Some(entry(Criterion::Location, reason, fraction))
}

fn price_entry(listing: &Listing, budget: Option<f64>) -> Option<Explanation> {
    let budget = positive(budget)?;

    let explanation = match listing.price {
        None => entry(Criterion::Price, "Price not listed".to_string(), 0.0),
        Some(price) => entry(
            Criterion::Price,
            format!("Price {} against budget {}", price, budget),
            symmetric_decay(price as f64, budget),
        ),
    };
    Some(explanation)
}

fn roi_entry(listing: &Listing, preferred: Option<f64>) -> Option<Explanation> {
    let preferred = positive(preferred)?;

    let explanation = match listing.roi {
        None => entry(Criterion::Roi, "ROI not listed".to_string(), 0.0),
        Some(roi) if roi >= preferred => entry(
            Criterion::Roi,
            format!("ROI {}% meets preferred {}%", roi, preferred),
            1.0,
        ),
        Some(roi) => entry(
            Criterion::Roi,
            format!("ROI {}% below preferred {}%", roi, preferred),
            attainment(roi, preferred),
        ),
    };
    Some(explanation)
}

fn area_entry(listing: &Listing, preferred: Option<f64>) -> Option<Explanation> {
    let preferred = positive(preferred)?;

    let explanation = match listing.area_sqft {
        None => entry(Criterion::Area, "Area not listed".to_string(), 0.0),
        Some(area) => entry(
            Criterion::Area,
            format!("Area {} sqft against preferred {} sqft", area, preferred),
            symmetric_decay(area, preferred),
        ),
    };
    Some(explanation)
}

fn highway_entry(listing: &Listing, bound: Option<f64>) -> Option<Explanation> {
    let bound = positive(bound)?;

    let explanation = match listing.distance_from_highway {
        None => entry(
            Criterion::HighwayDistance,
            "Distance from highway not listed".to_string(),
            0.0,
        ),
        Some(distance) if distance <= bound => entry(
            Criterion::HighwayDistance,
            format!("{} from highway, within {}", distance, bound),
            1.0,
        ),
        Some(distance) => entry(
            Criterion::HighwayDistance,
            format!("{} from highway, beyond {}", distance, bound),
            overshoot_decay(distance, bound),
        ),
    };
    Some(explanation)
}
