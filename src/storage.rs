//! Storage for uploaded images.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use actix_multipart::form::tempfile::TempFile;
use chrono::Utc;
use thiserror::Error;

use crate::domain::types::{ImageUrl, TypeConstraintError};

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored object has an invalid url: {0}")]
    InvalidUrl(#[from] TypeConstraintError),
    #[error("object is not managed by this store: {0}")]
    Foreign(String),
}

/// Persists uploads and returns the URL they are served from.
pub trait ObjectStore: Send + Sync {
    fn store(&self, folder: &str, upload: &TempFile) -> Result<ImageUrl, StorageError>;

    /// Deletes an object previously returned by [`ObjectStore::store`].
    fn remove(&self, url: &ImageUrl) -> Result<(), StorageError>;
}

/// Stores every upload or none of them.
///
/// All extensions are checked before the first write; if a later write
/// fails the objects already stored are removed again.
pub fn store_all<S>(
    store: &S,
    folder: &str,
    uploads: &[&TempFile],
) -> Result<Vec<ImageUrl>, StorageError>
where
    S: ObjectStore + ?Sized,
{
    for upload in uploads {
        image_extension(upload)?;
    }

    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match store.store(folder, upload) {
            Ok(url) => stored.push(url),
            Err(e) => {
                discard(store, &stored);
                return Err(e);
            }
        }
    }
    Ok(stored)
}

/// Best-effort removal of stored objects after a failed write.
pub fn discard<S>(store: &S, urls: &[ImageUrl])
where
    S: ObjectStore + ?Sized,
{
    for url in urls {
        if let Err(e) = store.remove(url) {
            log::warn!("Failed to remove orphaned upload {url}: {e}");
        }
    }
}

/// Whether the multipart part actually carries a file.
///
/// Browsers submit an empty part for file inputs left blank.
pub fn has_content(upload: &TempFile) -> bool {
    upload.size > 0
}

/// Lowercased extension of the client-supplied file name, if allowed.
pub fn image_extension(upload: &TempFile) -> Result<String, StorageError> {
    let name = upload.file_name.as_deref().unwrap_or_default();
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(StorageError::UnsupportedType(name.to_string()))
    }
}

/// Folder name derived from an owner id, restricted to path-safe characters.
pub fn folder_for(owner: &str) -> String {
    owner
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}

/// Writes uploads below `root` and serves them under `public_url`.
pub struct LocalObjectStore {
    root: PathBuf,
    public_url: String,
    counter: AtomicU64,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_url: &str) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
            counter: AtomicU64::new(0),
        }
    }

    fn unique_name(&self, extension: &str) -> String {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let stamp = Utc::now().timestamp_micros();
        format!("{stamp}-{sequence}.{extension}")
    }
}

impl ObjectStore for LocalObjectStore {
    fn store(&self, folder: &str, upload: &TempFile) -> Result<ImageUrl, StorageError> {
        let extension = image_extension(upload)?;
        let folder = folder_for(folder);
        let name = self.unique_name(&extension);

        let directory = self.root.join(&folder);
        std::fs::create_dir_all(&directory)?;
        std::fs::copy(upload.file.path(), directory.join(&name))?;

        log::info!("Stored upload {folder}/{name} ({} bytes)", upload.size);
        Ok(ImageUrl::new(format!("{}/{folder}/{name}", self.public_url))?)
    }

    fn remove(&self, url: &ImageUrl) -> Result<(), StorageError> {
        let relative = url
            .as_str()
            .strip_prefix(&self.public_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| rest.split('/').all(|part| !part.is_empty() && part != ".."))
            .ok_or_else(|| StorageError::Foreign(url.to_string()))?;

        std::fs::remove_file(self.root.join(relative))?;
        log::info!("Removed upload {relative}");
        Ok(())
    }
}
