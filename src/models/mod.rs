// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{CatalogQuery, ColumnConstraint, Coordinates, Criterion, Explanation, Listing, MustHave, Preferences, ScoreResult};
pub use requests::{PageParams, RecommendationRequest};
pub use responses::{ErrorResponse, HealthResponse, Pagination, RecommendationResponse, ScoredListing};
