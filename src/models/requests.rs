use crate::models::domain::{MustHave, Preferences};
use crate::models::lenient;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank the catalog for one buyer
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(nested)]
    #[serde(rename = "mustHave", alias = "must_have", default)]
    pub must_have: MustHave,
    #[validate(nested)]
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default, deserialize_with = "lenient::number")]
    pub page: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub limit: Option<f64>,
}

/// Pagination overrides accepted from the query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "lenient::number")]
    pub page: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub limit: Option<f64>,
}
