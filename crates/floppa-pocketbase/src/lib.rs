//! floppa-pocketbase - PocketBase-backed image source.
//!
//! [`StoreClient`] speaks the PocketBase REST API: it asks the store for a
//! random record, downloads the attached file, and bumps the record's view
//! counter in the background. [`PocketBaseSource`] binds a client to one
//! collection and implements [`floppa_core::ImageSource`].
//!
//! # Example
//!
//! ```no_run
//! use floppa_core::{CollectionName, ImageSource, StoreUrl};
//! use floppa_pocketbase::{PocketBaseSource, StoreClient};
//!
//! # async fn example() -> Result<(), floppa_core::Error> {
//! let client = StoreClient::new(StoreUrl::new("http://pocketbase:8090")?)?;
//! let macka = PocketBaseSource::new("macka", CollectionName::new("macky")?, client);
//!
//! let image = macka.random_image().await?;
//! if let Some(record) = &image.record {
//!     macka.schedule_view_update(record);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoints;
mod source;

pub use client::{ClientConfig, StoreClient};
pub use source::PocketBaseSource;
