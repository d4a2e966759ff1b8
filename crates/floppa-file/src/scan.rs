//! Directory scanning.

use std::path::{Path, PathBuf};

use floppa_core::Error;
use floppa_core::Result;

/// File extensions served as images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

fn map_io(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Returns true if `path` has an image file extension (case-insensitive).
pub fn is_image_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

/// List the image files directly inside `dir`, sorted by path.
///
/// Subdirectories and non-image files are skipped.
pub(crate) async fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| map_io(dir, e))?;

    let mut images = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| map_io(dir, e))? {
        let file_type = entry.file_type().await.map_err(|e| map_io(dir, e))?;
        if file_type.is_dir() {
            continue;
        }

        let path = entry.path();
        if is_image_file(&path) {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}

/// Read a whole file.
pub(crate) async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| map_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_image_extensions() {
        assert!(is_image_file("floppa.jpg"));
        assert!(is_image_file("floppa.JPEG"));
        assert!(is_image_file("dir/floppa.webp"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("jpg"));
        assert!(!is_image_file(".gitkeep"));
    }

    #[tokio::test]
    async fn list_skips_directories_and_other_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"b").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        std::fs::write(dir.path().join("readme.md"), b"#").unwrap();
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let images = list_images(dir.path()).await.unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[tokio::test]
    async fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");

        let err = list_images(&missing).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
