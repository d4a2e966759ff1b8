//! Validated identifier types.

mod collection;
mod external_id;
mod store_url;

pub use collection::CollectionName;
pub use external_id::ExternalId;
pub use store_url::StoreUrl;
