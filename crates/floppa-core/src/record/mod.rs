//! Record-store data model.

mod types;

pub use types::{CollectionPage, CollectionRecord, RandomImage};
