//! Bounce records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::client::ListmonkClient;
use crate::error::Result;
use crate::models::{null_as_default, IdQuery, SortOrder};
use crate::pagination::{Page, PerPage};
use crate::routes;
use crate::traits::{Delete, List};

/// A bounce reported for a subscriber, optionally tied to a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounce {
    pub id: u64,

    /// `soft`, `hard` or `complaint`.
    #[serde(rename = "type", default)]
    pub bounce_type: String,

    /// Where the bounce was reported from, e.g. `api` or a webhook name.
    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub subscriber_id: u64,

    #[serde(default)]
    pub subscriber_uuid: Uuid,

    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Map<String, Value>,

    #[serde(default)]
    pub campaign: Option<BounceCampaign>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Campaign reference on a [`Bounce`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceCampaign {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Query parameters for listing bounces.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct BounceListQuery {
    /// Only bounces recorded against this campaign.
    pub campaign_id: Option<u64>,

    pub source: Option<String>,

    /// Sort field: `email`, `campaign_name`, `source` or `created_at`.
    pub order_by: Option<String>,

    pub order: Option<SortOrder>,

    pub page: Option<u32>,

    pub per_page: Option<PerPage>,
}

#[derive(Serialize)]
struct AllFlag {
    all: bool,
}

#[async_trait]
impl List for Bounce {
    type Query = BounceListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &ListmonkClient, query: &Self::Query) -> Result<Page<Self>> {
        routes::GET_BOUNCES.call_with(client, &[], query).await
    }
}

#[async_trait]
impl Delete for Bounce {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ListmonkClient, id: u64) -> Result<bool> {
        routes::DELETE_BOUNCE.call(client, &[&id]).await
    }
}

/// Delete every bounce record.
#[tracing::instrument(skip(client))]
pub async fn delete_all_bounces(client: &ListmonkClient) -> Result<bool> {
    routes::DELETE_BOUNCES
        .call_with(client, &[], &AllFlag { all: true })
        .await
}

/// Delete the given bounce records.
#[tracing::instrument(skip(client))]
pub async fn delete_bounces(client: &ListmonkClient, ids: &[u64]) -> Result<bool> {
    routes::DELETE_BOUNCES
        .call_with(client, &[], &IdQuery { id: ids })
        .await
}
