//! Subscriber model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::client::ListmonkClient;
use crate::error::Result;
use crate::models::{null_as_default, Bounce, IdBody, IdQuery, ListOptin, ListType, SortOrder};
use crate::pagination::{Page, PerPage};
use crate::routes;
use crate::traits::{Create, Delete, Get, List, Update};

/// A listmonk subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: u64,

    #[serde(default)]
    pub uuid: Uuid,

    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: SubscriberStatus,

    /// Arbitrary JSON attributes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attribs: Map<String, Value>,

    /// Lists the subscriber belongs to, with per-list subscription state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub lists: Vec<Subscription>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Account status of a subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    #[default]
    Enabled,
    Disabled,
    Blocklisted,
}

/// State of a subscriber's membership in one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Unconfirmed,
    Confirmed,
    Unsubscribed,
}

/// A list as seen from one subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,

    #[serde(default)]
    pub uuid: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub list_type: Option<ListType>,

    #[serde(default)]
    pub optin: Option<ListOptin>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub subscription_status: Option<SubscriptionStatus>,

    #[serde(default)]
    pub subscription_created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub subscription_updated_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_meta: Map<String, Value>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Subscriber {
    pub fn is_blocklisted(&self) -> bool {
        self.status == SubscriberStatus::Blocklisted
    }

    /// IDs of every list the subscriber is on, in server order.
    pub fn list_ids(&self) -> Vec<u64> {
        self.lists.iter().map(|l| l.id).collect()
    }

    /// Look up a top-level attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attribs.get(key)
    }

    /// Bounce records for this subscriber.
    pub async fn bounces(&self, client: &ListmonkClient) -> Result<Vec<Bounce>> {
        get_subscriber_bounces(client, self.id).await
    }

    /// Full data export for this subscriber.
    pub async fn export(&self, client: &ListmonkClient) -> Result<SubscriberExport> {
        export_subscriber(client, self.id).await
    }
}

/// Query parameters for searching subscribers.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriberListQuery {
    /// SQL expression over the subscribers table,
    /// e.g. `subscribers.attribs->>'city' = 'Berlin'`.
    pub query: Option<String>,

    /// Only subscribers on these lists.
    #[serde(rename = "list_id")]
    pub list_ids: Vec<u64>,

    /// Subscription status filter; only applies together with `list_ids`.
    pub subscription_status: Option<SubscriptionStatus>,

    /// Sort field: `name`, `status`, `created_at` or `updated_at`.
    pub order_by: Option<String>,

    pub order: Option<SortOrder>,

    pub page: Option<u32>,

    pub per_page: Option<PerPage>,
}

/// Parameters for creating or replacing a subscriber.
///
/// On update every field is applied; lists left out are unsubscribed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriberParams {
    pub email: String,
    pub name: String,
    pub status: SubscriberStatus,
    pub lists: Vec<u64>,
    pub attribs: Map<String, Value>,
    /// Mark double opt-in subscriptions as confirmed without sending opt-in mail.
    pub preconfirm_subscriptions: bool,
}

/// Parameters for the unauthenticated public subscription form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublicSubscriptionParams {
    pub email: String,
    pub name: String,
    pub list_uuids: Vec<Uuid>,
}

/// What to do with the subscribers' memberships in the target lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipAction {
    Add,
    Remove,
    Unsubscribe,
}

/// Parameters for bulk list membership changes.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct ListMembershipParams {
    pub ids: Vec<u64>,
    pub action: MembershipAction,
    pub target_list_ids: Vec<u64>,
    /// Required when `action` is [`MembershipAction::Add`].
    pub status: Option<SubscriptionStatus>,
}

/// Selects subscribers by SQL expression for bulk blocklist/delete.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriberQueryParams {
    pub query: String,
    /// Restrict the expression to these lists.
    pub list_ids: Vec<u64>,
    /// Delete only: ignore `query` and remove every subscriber.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub all: bool,
}

/// Everything listmonk stores about one subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberExport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: Vec<ExportProfile>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub subscriptions: Vec<ExportSubscription>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub campaign_views: Vec<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub link_clicks: Vec<Value>,
}

/// Profile section of a [`SubscriberExport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportProfile {
    pub id: u64,
    #[serde(default)]
    pub uuid: Uuid,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: SubscriberStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attribs: Map<String, Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Subscription section of a [`SubscriberExport`]. Private list names are
/// replaced by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSubscription {
    pub name: String,
    #[serde(rename = "type", default)]
    pub list_type: Option<ListType>,
    #[serde(default)]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl Get for Subscriber {
    #[tracing::instrument(skip(client))]
    async fn get(client: &ListmonkClient, id: u64) -> Result<Self> {
        routes::GET_SUBSCRIBER.call(client, &[&id]).await
    }
}

#[async_trait]
impl List for Subscriber {
    type Query = SubscriberListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &ListmonkClient, query: &Self::Query) -> Result<Page<Self>> {
        routes::GET_SUBSCRIBERS.call_with(client, &[], query).await
    }
}

#[async_trait]
impl Create for Subscriber {
    type Params = SubscriberParams;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &ListmonkClient, params: Self::Params) -> Result<Self> {
        routes::CREATE_SUBSCRIBER.call_with(client, &[], &params).await
    }
}

#[async_trait]
impl Update for Subscriber {
    type Params = SubscriberParams;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &ListmonkClient, id: u64, params: Self::Params) -> Result<Self> {
        routes::UPDATE_SUBSCRIBER.call_with(client, &[&id], &params).await
    }
}

#[async_trait]
impl Delete for Subscriber {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ListmonkClient, id: u64) -> Result<bool> {
        routes::DELETE_SUBSCRIBER.call(client, &[&id]).await
    }
}

/// Export a subscriber's profile, subscriptions, campaign views and link clicks.
#[tracing::instrument(skip(client))]
pub async fn export_subscriber(client: &ListmonkClient, id: u64) -> Result<SubscriberExport> {
    routes::EXPORT_SUBSCRIBER.call(client, &[&id]).await
}

/// Bounce records for one subscriber.
#[tracing::instrument(skip(client))]
pub async fn get_subscriber_bounces(client: &ListmonkClient, id: u64) -> Result<Vec<Bounce>> {
    routes::GET_SUBSCRIBER_BOUNCES.call(client, &[&id]).await
}

/// Send the opt-in confirmation mail to a subscriber.
#[tracing::instrument(skip(client))]
pub async fn send_optin_confirmation(client: &ListmonkClient, id: u64) -> Result<bool> {
    routes::SEND_OPTIN_CONFIRMATION.call(client, &[&id]).await
}

/// Subscribe through the public form endpoint.
///
/// The server answers with an acknowledgement object whose shape varies
/// by version; any success is reported as `true`.
#[tracing::instrument(skip(client, params), fields(email = %params.email))]
pub async fn create_public_subscription(
    client: &ListmonkClient,
    params: &PublicSubscriptionParams,
) -> Result<bool> {
    routes::CREATE_PUBLIC_SUBSCRIPTION
        .call_with(client, &[], params)
        .await?;
    Ok(true)
}

/// Add, remove or unsubscribe subscribers from lists in bulk.
#[tracing::instrument(skip(client, params))]
pub async fn update_list_memberships(
    client: &ListmonkClient,
    params: &ListMembershipParams,
) -> Result<bool> {
    routes::UPDATE_LIST_MEMBERSHIPS
        .call_with(client, &[], params)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn blocklist_subscriber(client: &ListmonkClient, id: u64) -> Result<bool> {
    routes::BLOCKLIST_SUBSCRIBER.call(client, &[&id]).await
}

#[tracing::instrument(skip(client))]
pub async fn blocklist_subscribers(client: &ListmonkClient, ids: &[u64]) -> Result<bool> {
    routes::BLOCKLIST_SUBSCRIBERS
        .call_with(client, &[], &IdBody { ids })
        .await
}

/// Blocklist every subscriber matching an SQL expression.
#[tracing::instrument(skip(client, params))]
pub async fn blocklist_subscribers_by_query(
    client: &ListmonkClient,
    params: &SubscriberQueryParams,
) -> Result<bool> {
    routes::BLOCKLIST_SUBSCRIBERS_BY_QUERY
        .call_with(client, &[], params)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn delete_subscriber_bounces(client: &ListmonkClient, id: u64) -> Result<bool> {
    routes::DELETE_SUBSCRIBER_BOUNCES.call(client, &[&id]).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_subscribers(client: &ListmonkClient, ids: &[u64]) -> Result<bool> {
    routes::DELETE_SUBSCRIBERS
        .call_with(client, &[], &IdQuery { id: ids })
        .await
}

/// Delete every subscriber matching an SQL expression (or all of them).
#[tracing::instrument(skip(client, params))]
pub async fn delete_subscribers_by_query(
    client: &ListmonkClient,
    params: &SubscriberQueryParams,
) -> Result<bool> {
    routes::DELETE_SUBSCRIBERS_BY_QUERY
        .call_with(client, &[], params)
        .await
}
