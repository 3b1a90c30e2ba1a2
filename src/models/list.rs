//! Mailing list model and trait implementations.
//!
//! Named `MailingList` to keep it apart from the [`List`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use uuid::Uuid;

use crate::client::ListmonkClient;
use crate::error::Result;
use crate::models::{null_as_default, SortOrder};
use crate::pagination::{Page, PerPage};
use crate::routes;
use crate::traits::{Create, Delete, Get, List, Update};

/// A listmonk mailing list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailingList {
    pub id: u64,

    #[serde(default)]
    pub uuid: Uuid,

    pub name: String,

    #[serde(rename = "type")]
    pub list_type: ListType,

    pub optin: ListOptin,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub subscriber_count: u64,

    /// Subscriber counts keyed by subscription status.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscriber_statuses: Map<String, serde_json::Value>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Visibility of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Private,
    Public,
    Temporary,
}

/// Opt-in mode of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOptin {
    #[default]
    Single,
    Double,
}

/// Name and UUID of a public list, as served to subscription forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicList {
    pub uuid: Uuid,
    pub name: String,
}

impl MailingList {
    pub fn is_public(&self) -> bool {
        self.list_type == ListType::Public
    }

    pub fn is_double_optin(&self) -> bool {
        self.optin == ListOptin::Double
    }

    /// Subscriber count for one subscription status, if the server sent it.
    pub fn subscriber_count_for(&self, status: &str) -> Option<u64> {
        self.subscriber_statuses.get(status).and_then(|v| v.as_u64())
    }
}

/// Query parameters for searching lists.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct MailingListQuery {
    /// Name search string.
    pub query: Option<String>,

    /// Repeated `status` filter.
    pub status: Vec<String>,

    /// Repeated `tag` filter.
    #[serde(rename = "tag")]
    pub tags: Vec<String>,

    /// Sort field: `name`, `status`, `created_at` or `updated_at`.
    pub order_by: Option<String>,

    pub order: Option<SortOrder>,

    pub page: Option<u32>,

    pub per_page: Option<PerPage>,
}

/// Parameters for creating or updating a list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MailingListParams {
    pub name: String,
    #[serde(rename = "type")]
    pub list_type: ListType,
    pub optin: ListOptin,
    pub tags: Vec<String>,
    pub description: String,
}

#[async_trait]
impl Get for MailingList {
    #[tracing::instrument(skip(client))]
    async fn get(client: &ListmonkClient, id: u64) -> Result<Self> {
        routes::GET_LIST.call(client, &[&id]).await
    }
}

#[async_trait]
impl List for MailingList {
    type Query = MailingListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &ListmonkClient, query: &Self::Query) -> Result<Page<Self>> {
        routes::GET_LISTS.call_with(client, &[], query).await
    }
}

#[async_trait]
impl Create for MailingList {
    type Params = MailingListParams;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &ListmonkClient, params: Self::Params) -> Result<Self> {
        routes::CREATE_LIST.call_with(client, &[], &params).await
    }
}

#[async_trait]
impl Update for MailingList {
    type Params = MailingListParams;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &ListmonkClient, id: u64, params: Self::Params) -> Result<Self> {
        routes::UPDATE_LIST.call_with(client, &[&id], &params).await
    }
}

#[async_trait]
impl Delete for MailingList {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ListmonkClient, id: u64) -> Result<bool> {
        routes::DELETE_LIST.call(client, &[&id]).await
    }
}

/// Public lists, for building subscription forms. The server does not
/// require authentication for this call and answers without an envelope.
#[tracing::instrument(skip(client))]
pub async fn get_public_lists(client: &ListmonkClient) -> Result<Vec<PublicList>> {
    routes::GET_PUBLIC_LISTS.call(client, &[]).await
}
