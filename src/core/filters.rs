use crate::models::{Listing, MustHave};

/// Check if a listing satisfies every active must-have constraint
///
/// Absent constraints pass. A numeric constraint fails when the listing has
/// no value for the attribute it bounds.
#[inline]
pub fn satisfies_must_have(listing: &Listing, must_have: &MustHave) -> bool {
    if let Some(location) = &must_have.location {
        if !contains_ignore_case(&listing.location, location) {
            return false;
        }
    }

    if let Some(category_id) = must_have.category_id {
        if listing.category_id != category_id {
            return false;
        }
    }

    // Exact match, not substring
    if let Some(status) = &must_have.status {
        if listing.status.to_lowercase() != status.to_lowercase() {
            return false;
        }
    }

    if must_have.min_price.is_some() || must_have.max_price.is_some() {
        let Some(price) = listing.price.map(|p| p as f64) else {
            return false;
        };
        if must_have.min_price.is_some_and(|min| price < min)
            || must_have.max_price.is_some_and(|max| price > max)
        {
            return false;
        }
    }

    if let Some(min_roi) = must_have.min_roi {
        if !listing.roi.is_some_and(|roi| roi >= min_roi) {
            return false;
        }
    }

    if let Some(min_area) = must_have.min_area {
        if !listing.area_sqft.is_some_and(|area| area >= min_area) {
            return false;
        }
    }

    if let Some(max_distance) = must_have.max_distance_from_highway {
        if !listing
            .distance_from_highway
            .is_some_and(|distance| distance <= max_distance)
        {
            return false;
        }
    }

    true
}

/// Keep the listings that pass every must-have constraint, preserving order
pub fn apply_must_have(listings: Vec<Listing>, must_have: &MustHave) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|listing| satisfies_must_have(listing, must_have))
        .collect()
}

/// Case-insensitive substring test shared by filtering and scoring
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
