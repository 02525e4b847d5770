// Service exports
pub mod catalog;
pub mod geocoder;
pub mod recommender;

pub use catalog::{build_listing_query, CatalogError, InMemoryCatalog, ListingCatalog, PostgresCatalog};
pub use geocoder::{GeocodeError, Geocoder, HttpGeocoder};
pub use recommender::{RecommendError, Recommender};
