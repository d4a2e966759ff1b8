//! Record and page types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A record from a remote collection.
///
/// Owned by the store; the client only ever holds a read snapshot taken
/// at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Store-assigned record id.
    pub id: String,

    /// File name of the attached image, empty when none is set.
    #[serde(default)]
    pub image: String,

    /// Display-only view counter.
    #[serde(default)]
    pub views: u64,
}

impl CollectionRecord {
    /// Returns true if the record references an image file.
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// One page of a collection listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPage {
    /// The records in this page, in whatever order the store chose.
    #[serde(default)]
    pub items: Vec<CollectionRecord>,

    /// Total number of records matching the query.
    #[serde(default)]
    pub total_items: u64,

    #[serde(default)]
    pub page: u64,

    #[serde(default)]
    pub per_page: u64,

    #[serde(default)]
    pub total_pages: u64,
}

impl CollectionPage {
    /// Returns the first record of the page, if any.
    pub fn first(&self) -> Option<&CollectionRecord> {
        self.items.first()
    }

    /// Consumes the page, returning its first record.
    pub fn into_first(self) -> Option<CollectionRecord> {
        self.items.into_iter().next()
    }
}

/// An image picked by an [`ImageSource`](crate::ImageSource).
#[derive(Debug, Clone)]
pub struct RandomImage {
    /// Raw image payload.
    pub bytes: Bytes,

    /// The remote record the image belongs to.
    ///
    /// `None` for sources without records (local directories).
    pub record: Option<CollectionRecord>,
}

impl RandomImage {
    /// An image with no backing record.
    pub fn local(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            record: None,
        }
    }

    /// An image fetched for `record`.
    pub fn remote(bytes: impl Into<Bytes>, record: CollectionRecord) -> Self {
        Self {
            bytes: bytes.into(),
            record: Some(record),
        }
    }
}
