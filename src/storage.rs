use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Image extensions the store accepts for upload.
const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Subdirectory of the media root that holds product images.
const PRODUCT_FOLDER: &str = "productos";

/// Errors produced by the media store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Filesystem-backed store for uploaded product images.
///
/// Files live under `root` and are served back under `public_prefix`, so the
/// returned URLs resolve through the static-files mount.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_prefix: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create the product image directory if it does not exist yet.
    pub fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.root.join(PRODUCT_FOLDER))?;
        Ok(())
    }

    /// Persist `bytes` under a fresh unique name keeping the extension of
    /// `original_name`, and return the public URL of the stored file.
    pub fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| StorageError::UnsupportedType(original_name.to_string()))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(StorageError::UnsupportedType(original_name.to_string()));
        }

        let file_name = format!(
            "{}_{}.{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );

        self.ensure_root()?;
        fs::write(self.root.join(PRODUCT_FOLDER).join(&file_name), bytes)?;

        Ok(format!(
            "{}/{}/{}",
            self.public_prefix, PRODUCT_FOLDER, file_name
        ))
    }

    /// Whether `url` points at a file stored by this instance.
    pub fn owns(&self, url: &str) -> bool {
        self.file_path(url).is_some()
    }

    /// Delete the file behind `url`. URLs outside the store and files already
    /// gone are left alone.
    pub fn remove(&self, url: &str) -> Result<(), StorageError> {
        let Some(path) = self.file_path(url) else {
            return Ok(());
        };

        match fs::remove_file(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => Ok(other?),
        }
    }

    /// Resolve a public URL back to the file it names, if it belongs here.
    fn file_path(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(&self.public_prefix)?.strip_prefix('/')?;

        // The store only ever writes <folder>/<file> pairs.
        let (folder, file_name) = relative.split_once('/')?;
        if folder != PRODUCT_FOLDER || file_name.is_empty() || file_name.contains(['/', '\\']) {
            return None;
        }
        if file_name == "." || file_name == ".." {
            return None;
        }

        Some(self.root.join(folder).join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, MediaStore) {
        let dir = tempfile::tempdir().expect("temp media dir");
        let store = MediaStore::new(dir.path(), "/media");
        (dir, store)
    }

    #[test]
    fn store_writes_file_and_returns_public_url() {
        let (dir, store) = store();

        let url = store
            .store("camiseta titular.PNG", b"fake image bytes")
            .expect("stored");

        assert!(url.starts_with("/media/productos/"));
        assert!(url.ends_with(".png"));

        let file_name = url.rsplit('/').next().expect("file name");
        let on_disk = dir.path().join("productos").join(file_name);
        assert_eq!(fs::read(on_disk).expect("read back"), b"fake image bytes");
    }

    #[test]
    fn store_rejects_unknown_extensions() {
        let (_dir, store) = store();

        assert!(matches!(
            store.store("malware.exe", b"nope"),
            Err(StorageError::UnsupportedType(_))
        ));
        assert!(matches!(
            store.store("sin-extension", b"nope"),
            Err(StorageError::UnsupportedType(_))
        ));
    }

    #[test]
    fn remove_deletes_owned_files_and_ignores_foreign_urls() {
        let (dir, store) = store();

        let url = store.store("foto.jpg", b"bytes").expect("stored");
        let file_name = url.rsplit('/').next().expect("file name").to_string();
        let on_disk = dir.path().join("productos").join(&file_name);
        assert!(on_disk.exists());

        store.remove(&url).expect("removed");
        assert!(!on_disk.exists());

        // Second removal and foreign URLs are both quiet no-ops.
        store.remove(&url).expect("idempotent");
        store
            .remove("https://cdn.example.com/productos/foto.jpg")
            .expect("foreign url ignored");

        assert!(!store.owns("https://cdn.example.com/productos/foto.jpg"));
        assert!(!store.owns("/media/productos/../escape.jpg"));
    }
}
