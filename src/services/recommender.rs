use crate::core::{find_matches, PageRequest};
use crate::models::{CatalogQuery, Preferences, RecommendationRequest, RecommendationResponse};
use crate::services::catalog::{CatalogError, ListingCatalog};
use crate::services::geocoder::{GeocodeError, Geocoder};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Errors that abort a recommendation request
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Catalog query failed: {0}")]
    Catalog(#[from] CatalogError),
}

/// Recommendation pipeline orchestrator
///
/// Validates the request, geocodes the location preference (best-effort),
/// fetches candidates from the catalog, then hands them to the in-memory
/// filter/score/rank pipeline.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<dyn ListingCatalog>,
    geocoder: Arc<dyn Geocoder>,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn ListingCatalog>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { catalog, geocoder }
    }

    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, RecommendError> {
        // Reject before touching any collaborator
        request.validate()?;

        let RecommendationRequest {
            must_have,
            mut preferences,
            page,
            limit,
        } = request;

        self.resolve_location(&mut preferences).await;

        // The catalog pre-filter only narrows the candidate set; the full
        // must-have predicate still runs in find_matches
        let query = CatalogQuery::from_must_have(&must_have);
        let candidates = self.catalog.find(&query).await?;

        tracing::debug!("Fetched {} candidates from catalog", candidates.len());

        let result = find_matches(
            candidates,
            &must_have,
            &preferences,
            PageRequest::clamped(page, limit),
        );

        tracing::info!(
            "Returning {} of {} ranked listings (from {} candidates)",
            result.matches.len(),
            result.pagination.total,
            result.total_candidates
        );

        Ok(RecommendationResponse {
            data: result.matches,
            pagination: result.pagination,
        })
    }

    /// Fill in preference coordinates from the location text when none were
    /// supplied. Any failure leaves the preferences untouched.
    async fn resolve_location(&self, preferences: &mut Preferences) {
        if preferences.coordinates().is_some() {
            return;
        }
        let Some(address) = preferences.location.clone() else {
            return;
        };

        match self.geocoder.resolve(&address).await {
            Ok(Some(coordinates)) => {
                tracing::debug!("Resolved {:?} to {:?}", address, coordinates);
                preferences.set_coordinates(coordinates);
            }
            Ok(None) => {
                tracing::debug!("No coordinates for {:?}, scoring location as text", address);
            }
            Err(GeocodeError::NotConfigured) => {
                tracing::debug!("Geocoding not configured, scoring location as text");
            }
            Err(e) => {
                tracing::warn!("Geocoding failed for {:?}, scoring location as text: {}", address, e);
            }
        }
    }
}
