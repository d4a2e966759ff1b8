//! Directory-backed image source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, instrument};

use floppa_core::{Error, ImageSource, RandomImage, Result};

use crate::scan::{list_images, read_file};

/// Serves images from a local directory.
///
/// The directory is rescanned on every call, so files added or removed
/// while the gateway runs are picked up immediately.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    name: String,
    directory: PathBuf,
}

impl DirectorySource {
    /// Create a new source named `name` reading from `directory`.
    pub fn new(name: impl Into<String>, directory: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Returns the directory this source reads from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl ImageSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(source = %self.name))]
    async fn random_image(&self) -> Result<RandomImage> {
        let images = list_images(&self.directory).await?;
        if images.is_empty() {
            return Err(Error::NotFound {
                collection: self.name.clone(),
            });
        }

        let index = rand::thread_rng().gen_range(0..images.len());
        let path = &images[index];
        debug!(path = %path.display(), "Serving local image");

        let bytes = read_file(path).await?;
        Ok(RandomImage::local(bytes))
    }

    async fn count(&self) -> Result<u64> {
        let images = list_images(&self.directory).await?;
        Ok(images.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_one_of_the_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.jpg"), b"one").unwrap();
        std::fs::write(dir.path().join("two.png"), b"two").unwrap();
        std::fs::write(dir.path().join("skip.txt"), b"txt").unwrap();

        let source = DirectorySource::new("floppa", dir.path());
        for _ in 0..20 {
            let image = source.random_image().await.unwrap();
            assert!(image.bytes == "one" || image.bytes == "two");
            assert!(image.record.is_none());
        }
    }

    #[tokio::test]
    async fn count_only_includes_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.jpg"), b"one").unwrap();
        std::fs::write(dir.path().join("two.gif"), b"two").unwrap();
        std::fs::write(dir.path().join("skip.txt"), b"txt").unwrap();

        let source = DirectorySource::new("floppa", dir.path());
        assert_eq!(source.count().await.unwrap(), 2);
        assert_eq!(source.name(), "floppa");
    }

    #[tokio::test]
    async fn empty_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new("floppa", dir.path());

        let err = source.random_image().await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(source.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_directory_fails() {
        let source = DirectorySource::new("floppa", "/definitely/not/here");
        assert!(matches!(
            source.random_image().await.unwrap_err(),
            Error::Io { .. }
        ));
    }
}
