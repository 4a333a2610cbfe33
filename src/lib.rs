// Client-side catalog engine for the stay booking platform

// Export one module per page concern plus the shared backend surface
pub mod api;
pub mod booking;
pub mod discovery;
pub mod filter;
pub mod listing;
pub mod paginate;
pub mod registration;

// Re-export key types for convenience
pub use api::{ApiError, CatalogApi, ClientConfig, ClientStats, HttpCatalogClient};
pub use booking::{Booking, BookingBoard};
pub use discovery::{
    DiscoveryController, DiscoveryEvent, DiscoveryState, DiscoveryView, Snapshot,
};
pub use filter::{filter_listings, PriceTier, SearchCriteria, TierSelection};
pub use listing::Listing;
pub use paginate::{paginate, PageView, PAGE_SIZE};
pub use registration::{
    PasswordCriteria, RegisterRequest, RegistrationError, SPECIAL_CHARACTERS,
};
