//! Photo intake: multipart upload persisted under the photos directory.
//!
//! Collisions on the suggested name are resolved with a numeric suffix
//! via atomic create-if-absent; an existing photo is never overwritten.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use platform_api::{ApiError, ApiResult};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::http::AppState;

const FILE_FIELD: &str = "file";
const FALLBACK_NAME: &str = "upload.bin";

pub fn routes() -> Router<AppState> {
    // No size validation on uploads; the default 2 MB body cap would
    // reject ordinary photos.
    Router::new()
        .route("/employee/savefile", post(save_file))
        .layer(DefaultBodyLimit::disable())
}

#[derive(Serialize)]
struct SavedFile {
    file_name: String,
}

async fn save_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<SavedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(err.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let suggested = field.file_name().unwrap_or(FALLBACK_NAME).to_string();
        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(err.to_string()))?;
        let stored = save_photo(&state.config.photos_dir, &suggested, &data)
            .await
            .map_err(|err| ApiError::internal(err.into()))?;
        info!(%suggested, %stored, "photo stored");
        return Ok(Json(SavedFile { file_name: stored }));
    }
    Err(ApiError::bad_request("no file field in request"))
}

/// Writes `data` under `dir`, deriving the stored name from `suggested`.
/// Returns the name actually used.
async fn save_photo(dir: &Path, suggested: &str, data: &[u8]) -> std::io::Result<String> {
    tokio::fs::create_dir_all(dir).await?;
    let base = sanitize(suggested);
    let (stem, ext) = split_name(&base);
    let mut attempt = 0u32;
    loop {
        let candidate = if attempt == 0 {
            base.clone()
        } else {
            format!("{stem}_{attempt}{ext}")
        };
        match open_new(dir.join(&candidate)).await {
            Ok(mut file) => {
                file.write_all(data).await?;
                file.flush().await?;
                return Ok(candidate);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(err) => return Err(err),
        }
    }
}

async fn open_new(path: PathBuf) -> std::io::Result<tokio::fs::File> {
    tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
}

/// Strips any directory components from a client-supplied name.
fn sanitize(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name.split_at(pos),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_only_the_final_component() {
        assert_eq!(sanitize("photo.png"), "photo.png");
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("dir/sub/pic.jpg"), "pic.jpg");
        assert_eq!(sanitize(""), "upload.bin");
        assert_eq!(sanitize(".."), "upload.bin");
    }

    #[test]
    fn split_name_separates_extension() {
        assert_eq!(split_name("photo.png"), ("photo", ".png"));
        assert_eq!(split_name("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_name("noext"), ("noext", ""));
        assert_eq!(split_name(".hidden"), (".hidden", ""));
    }

    #[tokio::test]
    async fn save_photo_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = save_photo(dir.path(), "a.txt", b"one").await.unwrap();
        let second = save_photo(dir.path(), "a.txt", b"two").await.unwrap();
        let third = save_photo(dir.path(), "a.txt", b"three").await.unwrap();
        assert_eq!(first, "a.txt");
        assert_eq!(second, "a_1.txt");
        assert_eq!(third, "a_2.txt");
        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"one");
        assert_eq!(std::fs::read(dir.path().join("a_2.txt")).unwrap(), b"three");
    }
}
