// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod numeric;
pub mod scoring;

pub use distance::{distance_between, haversine_distance};
pub use filters::{apply_must_have, satisfies_must_have};
pub use matcher::{find_matches, paginate, rank_listings, MatchResult, PageRequest};
pub use scoring::{score_listing, LocationMode};
