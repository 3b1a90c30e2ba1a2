//! Subscriber CSV imports.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::ListmonkClient;
use crate::error::{ListmonkError, Result};
use crate::multipart::{FileContents, FilePart, MultipartForm};
use crate::routes;

/// Progress of the current (or last) import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStatus {
    /// Name of the uploaded file.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub imported: u64,

    /// `none`, `importing`, `stopping`, `stopped`, `finished` or `failed`.
    #[serde(default)]
    pub status: String,
}

impl ImportStatus {
    pub fn is_running(&self) -> bool {
        self.status == "importing"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Subscribe,
    Blocklist,
}

/// Import settings, sent as the `params` part of the upload and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub mode: ImportMode,

    /// Single-character CSV delimiter.
    #[serde(rename = "delim")]
    pub delimiter: String,

    /// Lists to subscribe imported subscribers to.
    #[serde(default)]
    pub lists: Vec<u64>,

    /// Overwrite name, attributes and subscriptions of existing subscribers.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            mode: ImportMode::default(),
            delimiter: ",".to_string(),
            lists: Vec::new(),
            overwrite: false,
        }
    }
}

#[tracing::instrument(skip(client))]
pub async fn get_import_status(client: &ListmonkClient) -> Result<ImportStatus> {
    routes::GET_IMPORT_STATUS.call(client, &[]).await
}

/// Log output of the current import.
#[tracing::instrument(skip(client))]
pub async fn get_import_logs(client: &ListmonkClient) -> Result<String> {
    routes::GET_IMPORT_LOGS.call(client, &[]).await
}

/// Start an import from a CSV file (optionally ZIP compressed).
///
/// The settings go in the `params` part as JSON, the file in `file`.
#[tracing::instrument(skip(client, bytes), fields(size = bytes.len()))]
pub async fn import_subscribers(
    client: &ListmonkClient,
    config: &ImportConfig,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<ImportConfig> {
    import(client, config, file_name, FileContents::Bytes(bytes)).await
}

/// Import a CSV or ZIP file from disk. The file is streamed, not read into
/// memory.
///
/// # Errors
///
/// Returns [`ListmonkError::Io`] if the file cannot be opened.
#[tracing::instrument(skip(client, path))]
pub async fn import_subscribers_file(
    client: &ListmonkClient,
    config: &ImportConfig,
    path: impl AsRef<Path>,
) -> Result<ImportConfig> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "import.csv".to_string());
    import(client, config, &file_name, FileContents::Path(path.to_path_buf())).await
}

async fn import(
    client: &ListmonkClient,
    config: &ImportConfig,
    file_name: &str,
    contents: FileContents,
) -> Result<ImportConfig> {
    let params = serde_json::to_string(config).map_err(ListmonkError::Encode)?;
    let form = MultipartForm::new()
        .part(FilePart {
            field: "file".to_string(),
            file_name: file_name.to_string(),
            contents,
            mime: None,
        })
        .text("params", params);
    routes::IMPORT_SUBSCRIBERS.upload(client, &[], form).await
}

/// Stop the running import and clear its state.
#[tracing::instrument(skip(client))]
pub async fn abort_import(client: &ListmonkClient) -> Result<ImportStatus> {
    routes::ABORT_IMPORT.call(client, &[]).await
}
