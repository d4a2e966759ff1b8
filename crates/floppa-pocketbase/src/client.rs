//! PocketBase HTTP client implementation.

use std::time::Duration;

use bytes::Bytes;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace, warn};

use floppa_core::error::{Error, RemoteApiError, TransportError};
use floppa_core::{CollectionName, CollectionPage, CollectionRecord, ExternalId, Result, StoreUrl};

use crate::endpoints::{ListRecordsQuery, UpdateViewsRequest};

/// Timeouts applied by a [`StoreClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request timeout for list queries and file downloads.
    pub request_timeout: Duration,
    /// Deadline for the background view counter update.
    pub view_update_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            view_update_timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP client for a PocketBase record store.
///
/// Cheap to clone: all clones share one connection pool. Every foreground
/// operation is a plain future, so dropping it (for example when the
/// inbound request is cancelled) aborts the in-flight HTTP call.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    store: StoreUrl,
    config: ClientConfig,
}

impl StoreClient {
    /// Create a new client for the given store with default timeouts.
    pub fn new(store: StoreUrl) -> Result<Self> {
        Self::with_config(store, ClientConfig::default())
    }

    /// Create a new client with explicit timeouts.
    pub fn with_config(store: StoreUrl, config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("floppa/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            store,
            config,
        })
    }

    /// Returns the store URL this client is configured for.
    pub fn store(&self) -> &StoreUrl {
        &self.store
    }

    /// Returns the configured timeouts.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Ask the store for one random record of `collection` and download its image.
    ///
    /// Returns the image bytes together with the record they belong to, so the
    /// caller can schedule a view update. No side effect is performed here.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn fetch_random_image(
        &self,
        collection: &CollectionName,
    ) -> Result<(Bytes, CollectionRecord)> {
        let page = self
            .list_records(collection, &ListRecordsQuery::random_one())
            .await?;
        let record = select_image_record(collection, page)?;

        let bytes = self.download_image(collection, &record).await?;
        Ok((bytes, record))
    }

    /// Ask the store for a random record whose external id equals `external_id`
    /// and download its image.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn fetch_random_image_by_external_id(
        &self,
        collection: &CollectionName,
        external_id: &ExternalId,
    ) -> Result<Bytes> {
        let page = self
            .list_records(
                collection,
                &ListRecordsQuery::random_by_external_id(external_id),
            )
            .await?;
        let record = select_image_record(collection, page)?;

        self.download_image(collection, &record).await
    }

    /// Returns the live number of records in `collection`.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn collection_count(&self, collection: &CollectionName) -> Result<u64> {
        let page = self
            .list_records(collection, &ListRecordsQuery::count_only())
            .await?;
        Ok(page.total_items)
    }

    /// Set the view counter of `record_id` to `previous_views + 1`.
    ///
    /// The previous value is the one read at fetch time; concurrent updates
    /// of the same record can overwrite each other.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn increment_view_count(
        &self,
        collection: &CollectionName,
        record_id: &str,
        previous_views: u64,
    ) -> Result<()> {
        let url = self.store.record_url(collection, record_id);
        let body = UpdateViewsRequest {
            views: previous_views.saturating_add(1),
        };
        debug!(%url, views = body.views, "Updating view count");

        let timeout = self.config.view_update_timeout;
        let response = self
            .client
            .patch(url)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport(e, timeout))?;

        check_status(response, timeout).await?;
        Ok(())
    }

    /// Increment the view counter of `record` on a detached task.
    ///
    /// The task runs under its own deadline and is not cancelled when the
    /// caller goes away. Failures are logged and never returned; the handle
    /// is only useful for awaiting completion.
    pub fn spawn_view_update(
        &self,
        collection: &CollectionName,
        record: &CollectionRecord,
    ) -> JoinHandle<()> {
        let client = self.clone();
        let collection = collection.clone();
        let record_id = record.id.clone();
        let previous_views = record.views;

        tokio::spawn(async move {
            match client
                .increment_view_count(&collection, &record_id, previous_views)
                .await
            {
                Ok(()) => debug!(%collection, %record_id, "View count updated"),
                Err(e) => warn!(
                    %collection,
                    %record_id,
                    error = %e,
                    "Failed to update view count"
                ),
            }
        })
    }

    /// List records of `collection` with the given query parameters.
    async fn list_records(
        &self,
        collection: &CollectionName,
        query: &ListRecordsQuery,
    ) -> Result<CollectionPage> {
        let url = self.store.records_url(collection);
        debug!(%url, "Listing records");
        trace!(?query, "query parameters");

        let timeout = self.config.request_timeout;
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| map_transport(e, timeout))?;

        let body = read_body(check_status(response, timeout).await?, timeout).await?;
        let page: CollectionPage = serde_json::from_slice(&body)?;
        trace!(items = page.items.len(), total = page.total_items, "Listed records");
        Ok(page)
    }

    /// Download the image file attached to `record`.
    async fn download_image(
        &self,
        collection: &CollectionName,
        record: &CollectionRecord,
    ) -> Result<Bytes> {
        let url = self.store.file_url(collection, &record.id, &record.image);
        debug!(%url, "Downloading image");

        let timeout = self.config.request_timeout;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport(e, timeout))?;

        read_body(check_status(response, timeout).await?, timeout).await
    }
}

/// Pick the record to serve from a listing page.
fn select_image_record(
    collection: &CollectionName,
    page: CollectionPage,
) -> Result<CollectionRecord> {
    let record = page.into_first().ok_or_else(|| Error::NotFound {
        collection: collection.to_string(),
    })?;

    if !record.has_image() {
        return Err(Error::InvalidRecord {
            id: record.id,
            reason: "record has no image field".to_string(),
        });
    }

    Ok(record)
}

/// Pass a 2xx response through; turn anything else into a [`RemoteApiError`].
async fn check_status(response: reqwest::Response, timeout: Duration) -> Result<reqwest::Response> {
    let status = response.status();
    trace!(status = %status, "store response");

    if status.is_success() {
        return Ok(response);
    }

    let body = read_body(response, timeout).await?;
    Err(RemoteApiError::new(status.as_u16(), String::from_utf8_lossy(&body)).into())
}

async fn read_body(response: reqwest::Response, timeout: Duration) -> Result<Bytes> {
    response
        .bytes()
        .await
        .map_err(|e| map_transport(e, timeout))
}

fn map_transport(err: reqwest::Error, timeout: Duration) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}
