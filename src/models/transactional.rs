//! Transactional messages.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::client::ListmonkClient;
use crate::error::Result;
use crate::routes;

/// A message rendered from a `tx` template and sent to one or more subscribers.
///
/// Recipients are given by email or ID, singly or in bulk; set exactly one.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionalMessage {
    pub subscriber_email: Option<String>,

    pub subscriber_id: Option<u64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscriber_emails: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscriber_ids: Vec<u64>,

    pub template_id: u64,

    pub from_email: Option<String>,

    /// Available in the template as `{{ .Tx.Data.* }}`.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,

    /// Mail headers, sent as `[{"name": "value"}, ...]`.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "headers_as_objects"
    )]
    pub headers: Vec<(String, String)>,

    /// `email` unless a custom messenger is configured.
    pub messenger: Option<String>,

    pub content_type: Option<ContentType>,
}

/// Body format of a transactional message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Html,
    Markdown,
    Plain,
}

impl TransactionalMessage {
    /// A message for one subscriber, addressed by email.
    pub fn to_email(template_id: u64, email: impl Into<String>) -> Self {
        Self {
            template_id,
            subscriber_email: Some(email.into()),
            ..Default::default()
        }
    }

    /// A message for one subscriber, addressed by ID.
    pub fn to_subscriber(template_id: u64, subscriber_id: u64) -> Self {
        Self {
            template_id,
            subscriber_id: Some(subscriber_id),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

fn headers_as_objects<S: Serializer>(
    headers: &[(String, String)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(headers.len()))?;
    for (name, value) in headers {
        let mut entry = Map::with_capacity(1);
        entry.insert(name.clone(), Value::String(value.clone()));
        seq.serialize_element(&entry)?;
    }
    seq.end()
}

/// Send a transactional message.
#[tracing::instrument(skip(client, message), fields(template_id = message.template_id))]
pub async fn send_transactional(
    client: &ListmonkClient,
    message: &TransactionalMessage,
) -> Result<bool> {
    routes::SEND_TRANSACTIONAL.call_with(client, &[], message).await
}
