//! Propmatch - listing recommendation service for real-estate search
//!
//! This library ranks catalog listings for a buyer in two stages: hard
//! must-have filters exclude listings outright, then a weighted scoring
//! function ranks the survivors and explains every awarded point.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{find_matches, score_listing, satisfies_must_have, haversine_distance, PageRequest};
pub use models::{Listing, MustHave, Preferences, ScoreResult, ScoredListing, RecommendationRequest, RecommendationResponse};
