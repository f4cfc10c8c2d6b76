pub mod config;
pub mod controller;
pub mod criteria;
pub mod decode;
pub mod error;
pub mod geo;
pub mod models;
pub mod presentation;
pub mod request;
pub mod selection;
pub mod session;
pub mod sources;
pub mod traits;

pub use config::{FinderOptions, DEFAULT_API_URL, DEFAULT_PLACEHOLDER_LOGO};
pub use controller::{AppState, Controller, Event, PendingFetch, RequestTicket, Transition};
pub use criteria::{FilterCriteria, CUISINE_ALL};
pub use decode::decode_records;
pub use error::{ControllerError, FetchError};
pub use geo::distance_miles;
pub use models::{Address, Cuisine, Location, Rating, RestaurantRecord, SelectionResult};
pub use presentation::{
    CuisineOption, ListingView, MarkerView, PopupView, RenderInstruction, ALL_CUISINES_LABEL,
};
pub use request::{normalize_postcode, FetchRequest};
pub use selection::{enumerate_cuisines, select, select_top, DEFAULT_RESULT_LIMIT};
pub use session::Session;
pub use sources::{CatalogRestaurantSource, HttpRestaurantSource};
pub use traits::RestaurantSource;
