//! PocketBase-backed image source.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::task::JoinHandle;

use floppa_core::{
    CollectionName, CollectionRecord, ExternalId, ImageSource, RandomImage, Result,
};

use crate::client::StoreClient;

/// An [`ImageSource`] backed by one PocketBase collection.
#[derive(Debug, Clone)]
pub struct PocketBaseSource {
    name: String,
    collection: CollectionName,
    client: StoreClient,
}

impl PocketBaseSource {
    /// Bind `client` to `collection` under the display name `name`.
    pub fn new(name: impl Into<String>, collection: CollectionName, client: StoreClient) -> Self {
        Self {
            name: name.into(),
            collection,
            client,
        }
    }

    /// Returns the collection this source reads from.
    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &StoreClient {
        &self.client
    }

    /// Fetch a random image among the records tagged with `external_id`.
    ///
    /// Lookups by external id do not count as views.
    pub async fn image_by_external_id(&self, external_id: &ExternalId) -> Result<Bytes> {
        self.client
            .fetch_random_image_by_external_id(&self.collection, external_id)
            .await
    }

    /// Bump the view counter of `record` in the background.
    pub fn schedule_view_update(&self, record: &CollectionRecord) -> JoinHandle<()> {
        self.client.spawn_view_update(&self.collection, record)
    }
}

#[async_trait]
impl ImageSource for PocketBaseSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn random_image(&self) -> Result<RandomImage> {
        let (bytes, record) = self.client.fetch_random_image(&self.collection).await?;
        Ok(RandomImage::remote(bytes, record))
    }

    async fn count(&self) -> Result<u64> {
        self.client.collection_count(&self.collection).await
    }
}
