//! Uploaded media files.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::client::ListmonkClient;
use crate::error::Result;
use crate::models::null_as_default;
use crate::multipart::{FileContents, FilePart, MultipartForm};
use crate::routes;
use crate::traits::{Delete, Get};

/// A file in the listmonk media library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: u64,

    #[serde(default)]
    pub uuid: Uuid,

    pub filename: String,

    #[serde(default)]
    pub content_type: String,

    /// Public URL of the file.
    #[serde(default)]
    pub url: String,

    /// Public URL of the thumbnail; empty for non-images.
    #[serde(default)]
    pub thumb_url: String,

    /// Storage backend, `filesystem` or `s3`.
    #[serde(default)]
    pub provider: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Map<String, Value>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Media {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

#[async_trait]
impl Get for Media {
    #[tracing::instrument(skip(client))]
    async fn get(client: &ListmonkClient, id: u64) -> Result<Self> {
        routes::GET_MEDIA.call(client, &[&id]).await
    }
}

#[async_trait]
impl Delete for Media {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ListmonkClient, id: u64) -> Result<bool> {
        routes::DELETE_MEDIA.call(client, &[&id]).await
    }
}

/// Every file in the media library. listmonk does not paginate this call.
#[tracing::instrument(skip(client))]
pub async fn get_media_list(client: &ListmonkClient) -> Result<Vec<Media>> {
    routes::GET_MEDIA_LIST.call(client, &[]).await
}

/// Upload a file to the media library under the multipart field `file`.
#[tracing::instrument(skip(client, bytes), fields(size = bytes.len()))]
pub async fn upload_media(
    client: &ListmonkClient,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Media> {
    upload(client, file_name, FileContents::Bytes(bytes)).await
}

/// Upload a file from disk. The file is streamed, not read into memory.
///
/// # Errors
///
/// Returns [`crate::ListmonkError::Io`] if the file cannot be opened.
#[tracing::instrument(skip(client, path))]
pub async fn upload_media_file(client: &ListmonkClient, path: impl AsRef<Path>) -> Result<Media> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    upload(client, &file_name, FileContents::Path(path.to_path_buf())).await
}

async fn upload(client: &ListmonkClient, file_name: &str, contents: FileContents) -> Result<Media> {
    let form = MultipartForm::new().part(FilePart {
        field: "file".to_string(),
        file_name: file_name.to_string(),
        contents,
        mime: mime_for(file_name).map(str::to_string),
    });
    routes::UPLOAD_MEDIA.upload(client, &[], form).await
}

/// MIME type for the image and document formats listmonk accepts.
fn mime_for(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_deserialize() {
        let json = r#"{
            "id": 1,
            "uuid": "ec7b45ce-1408-4e5c-924e-965326a20287",
            "filename": "Media file",
            "created_at": "2020-04-29T21:43:24.829034+05:30",
            "thumb_url": "/uploads/image_thumb.jpg",
            "provider": "filesystem",
            "url": "/uploads/image.jpg",
            "content_type": "image/jpeg",
            "meta": null
        }"#;
        let media: Media = serde_json::from_str(json).unwrap();
        assert_eq!(media.filename, "Media file");
        assert!(media.is_image());
        assert!(media.meta.is_empty());
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(mime_for("logo.PNG"), Some("image/png"));
        assert_eq!(mime_for("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_for("notes.txt"), None);
        assert_eq!(mime_for("README"), None);
    }
}
