//! Image source trait.

use async_trait::async_trait;

use crate::{RandomImage, Result};

/// A source of random images.
///
/// Implementations decide where images live (a local directory, a remote
/// collection). Fetching never performs side effects; callers that want to
/// count views do so from the returned [`RandomImage::record`].
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Returns the display name of this source.
    fn name(&self) -> &str;

    /// Pick one image uniformly at random and return its bytes.
    async fn random_image(&self) -> Result<RandomImage>;

    /// Returns the number of images currently available.
    async fn count(&self) -> Result<u64>;
}
