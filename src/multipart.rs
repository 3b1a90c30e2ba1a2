//! Multipart form bodies for file uploads.

use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use reqwest::Body;

use crate::error::{ListmonkError, Result};

/// Where a file part's contents come from.
#[derive(Debug, Clone)]
pub enum FileContents {
    /// Contents already in memory.
    Bytes(Vec<u8>),
    /// A file on disk, streamed when the request is sent.
    Path(PathBuf),
}

/// A file attached to a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field the file is attached under.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    pub contents: FileContents,
    /// MIME type; `application/octet-stream` when unset.
    pub mime: Option<String>,
}

impl FilePart {
    async fn into_part(self) -> Result<Part> {
        let part = match self.contents {
            FileContents::Bytes(bytes) => Part::bytes(bytes),
            FileContents::Path(path) => {
                let file = tokio::fs::File::open(&path).await?;
                let len = file.metadata().await?.len();
                Part::stream_with_length(Body::from(file), len)
            }
        };
        let part = part.file_name(self.file_name);

        match self.mime {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ListmonkError::MultipartEncode(format!("MIME type {mime:?}: {e}"))),
            None => Ok(part),
        }
    }
}

/// Text fields plus file parts, sent as a single `multipart/form-data` body.
///
/// # Example
///
/// ```
/// use listmonk_api::MultipartForm;
///
/// let form = MultipartForm::new()
///     .text("params", r#"{"mode":"subscribe"}"#)
///     .file("file", "subscribers.csv", b"email,name\n".to_vec());
/// assert_eq!(form.files().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach in-memory file contents under `field`.
    #[must_use]
    pub fn file(self, field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.part(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            contents: FileContents::Bytes(bytes),
            mime: None,
        })
    }

    /// Attach a file with an explicit MIME type.
    #[must_use]
    pub fn file_with_mime(
        self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime: impl Into<String>,
    ) -> Self {
        self.part(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            contents: FileContents::Bytes(bytes),
            mime: Some(mime.into()),
        })
    }

    /// Attach a file part as-is.
    #[must_use]
    pub fn part(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Build the reqwest form. Files go first, then text fields.
    ///
    /// Files given by path are opened here and streamed, not read into memory.
    pub(crate) async fn into_form(self) -> Result<Form> {
        let mut form = Form::new();

        for file in self.files {
            let field = file.field.clone();
            form = form.part(field, file.into_part().await?);
        }

        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        Ok(form)
    }
}
