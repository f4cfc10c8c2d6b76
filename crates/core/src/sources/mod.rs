pub mod catalog;
pub mod http;

pub use catalog::CatalogRestaurantSource;
pub use http::HttpRestaurantSource;
