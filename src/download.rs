//! Saving original-resolution photos to disk
//!
//! The asset is fetched in full, written to a hidden `.part` file next to
//! its destination and then renamed into place, so an interrupted write
//! never leaves a truncated `image.jpg` behind.

use std::path::{Path, PathBuf};

use rfd::AsyncFileDialog;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiError, PexelsClient};
use crate::config::DownloadConfig;

/// Every download is offered under this name
pub const DEFAULT_FILENAME: &str = "image.jpg";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error("failed to write {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("save dialog was cancelled")]
    Cancelled,

    #[error("no download directory available")]
    NoDestination,
}

/// Where a finished download is written
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// Straight into this directory under a free variant of `image.jpg`
    Directory(PathBuf),
    /// Ask with a native save dialog, starting in the given directory
    Prompt(Option<PathBuf>),
}

impl Destination {
    pub fn from_config(config: &DownloadConfig) -> Result<Self, DownloadError> {
        if config.prompt {
            return Ok(Destination::Prompt(config.dir.clone()));
        }
        config
            .dir
            .clone()
            .map(Destination::Directory)
            .ok_or(DownloadError::NoDestination)
    }
}

/// Fetch `url` and save it to `destination`, returning the written path
pub async fn download(
    client: PexelsClient,
    url: String,
    destination: Destination,
) -> Result<PathBuf, DownloadError> {
    debug!(%url, "Downloading original");
    let bytes = client.fetch_bytes(&url).await?;

    let path = match destination {
        Destination::Directory(dir) => {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| io_error(&dir, e))?;
            available_path(&dir, DEFAULT_FILENAME)
        }
        Destination::Prompt(start_dir) => prompt_for_path(start_dir).await?,
    };

    save(&path, &bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "Download complete");
    Ok(path)
}

/// First of `name`, `stem (1).ext`, `stem (2).ext`, ... not present in `dir`
pub fn available_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let file = Path::new(name);
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    let extension = file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u32..)
        .map(|n| dir.join(format!("{} ({}){}", stem, n, extension)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Write through a temporary file, then move it into place
async fn save(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    let partial = partial_path(path);

    tokio::fs::write(&partial, bytes)
        .await
        .map_err(|e| io_error(&partial, e))?;

    if let Err(e) = tokio::fs::rename(&partial, path).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(io_error(path, e));
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
    path.with_file_name(format!(".{}.part", name))
}

async fn prompt_for_path(start_dir: Option<PathBuf>) -> Result<PathBuf, DownloadError> {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Save Image")
        .set_file_name(DEFAULT_FILENAME)
        .add_filter("JPEG image", &["jpg", "jpeg"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog
        .save_file()
        .await
        .map(|handle| handle.path().to_path_buf())
        .ok_or(DownloadError::Cancelled)
}

fn io_error(path: &Path, err: std::io::Error) -> DownloadError {
    DownloadError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    use super::*;
    use crate::api::client::test_server::serve;
    use crate::config::ApiConfig;

    const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0xff, 0xd9];

    async fn image_server() -> (PexelsClient, String) {
        let router = Router::new()
            .route("/original.jpeg", get(|| async { JPEG.to_vec() }))
            .route("/gone.jpeg", get(|| async { StatusCode::NOT_FOUND }));
        let base = serve(router).await;
        let client = PexelsClient::new(&ApiConfig {
            base_url: base.clone(),
            ..ApiConfig::default()
        })
        .unwrap();
        (client, base)
    }

    #[tokio::test]
    async fn test_download_writes_fixed_filename() {
        let (client, base) = image_server().await;
        let dir = tempfile::tempdir().unwrap();

        let path = download(
            client,
            format!("{}/original.jpeg", base),
            Destination::Directory(dir.path().to_path_buf()),
        )
        .await
        .unwrap();

        assert_eq!(path, dir.path().join("image.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), JPEG);
        assert!(!dir.path().join(".image.jpg.part").exists());
    }

    #[tokio::test]
    async fn test_repeat_downloads_do_not_overwrite() {
        let (client, base) = image_server().await;
        let dir = tempfile::tempdir().unwrap();
        let url = format!("{}/original.jpeg", base);
        let destination = Destination::Directory(dir.path().to_path_buf());

        let first = download(client.clone(), url.clone(), destination.clone()).await.unwrap();
        let second = download(client.clone(), url.clone(), destination.clone()).await.unwrap();
        let third = download(client, url, destination).await.unwrap();

        assert_eq!(first.file_name().unwrap(), "image.jpg");
        assert_eq!(second.file_name().unwrap(), "image (1).jpg");
        assert_eq!(third.file_name().unwrap(), "image (2).jpg");
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_nothing() {
        let (client, base) = image_server().await;
        let dir = tempfile::tempdir().unwrap();

        let result = download(
            client,
            format!("{}/gone.jpeg", base),
            Destination::Directory(dir.path().to_path_buf()),
        )
        .await;

        assert!(matches!(
            result,
            Err(DownloadError::Fetch(ApiError::Status { status: 404, .. }))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_directory_is_created() {
        let (client, base) = image_server().await;
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = download(
            client,
            format!("{}/original.jpeg", base),
            Destination::Directory(nested.clone()),
        )
        .await
        .unwrap();
        assert_eq!(path, nested.join("image.jpg"));
    }

    #[test]
    fn test_available_path_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo"), b"x").unwrap();
        assert_eq!(available_path(dir.path(), "photo"), dir.path().join("photo (1)"));
    }

    #[test]
    fn test_destination_from_config() {
        let config = DownloadConfig {
            dir: Some(PathBuf::from("/tmp/dl")),
            prompt: false,
        };
        assert_eq!(
            Destination::from_config(&config),
            Ok(Destination::Directory(PathBuf::from("/tmp/dl")))
        );

        let prompt = DownloadConfig { prompt: true, ..config };
        assert!(matches!(
            Destination::from_config(&prompt),
            Ok(Destination::Prompt(Some(_)))
        ));

        let nowhere = DownloadConfig { dir: None, prompt: false };
        assert_eq!(
            Destination::from_config(&nowhere),
            Err(DownloadError::NoDestination)
        );
    }
}
