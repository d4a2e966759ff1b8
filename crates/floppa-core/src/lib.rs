//! floppa-core - Core types and traits for the floppa image gateway.

pub mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use error::Error;
pub use record::{CollectionPage, CollectionRecord, RandomImage};
pub use traits::ImageSource;
pub use types::{CollectionName, ExternalId, StoreUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
