//! Campaign model, trait implementations and campaign actions.

use std::fmt;

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
use crate::traits::{Create, Delete, Get, List, Update};

/// A listmonk campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,

    #[serde(default)]
    pub uuid: Uuid,

    pub name: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub from_email: String,

    #[serde(rename = "type", default)]
    pub campaign_type: CampaignType,

    #[serde(default)]
    pub status: CampaignStatus,

    #[serde(default)]
    pub content_type: CampaignContentType,

    /// Empty when fetched with `no_body`.
    #[serde(default)]
    pub body: String,

    /// Block source of the body when `content_type` is `visual`.
    #[serde(default)]
    pub body_source: Option<String>,

    #[serde(default)]
    pub alt_body: Option<String>,

    #[serde(default)]
    pub messenger: String,

    #[serde(default)]
    pub template_id: Option<u64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub lists: Vec<CampaignList>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Vec<CampaignMedia>,

    /// Extra mail headers as single-entry objects, e.g. `[{"X-Mailer": "x"}]`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Vec<Map<String, Value>>,

    #[serde(default)]
    pub archive: bool,

    #[serde(default)]
    pub archive_slug: Option<String>,

    #[serde(default)]
    pub archive_template_id: Option<u64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub archive_meta: Map<String, Value>,

    #[serde(default)]
    pub views: u64,

    #[serde(default)]
    pub clicks: u64,

    #[serde(default)]
    pub bounces: u64,

    #[serde(default)]
    pub sent: u64,

    #[serde(default)]
    pub to_send: u64,

    #[serde(default)]
    pub send_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// List reference on a [`Campaign`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignList {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Media attachment reference on a [`Campaign`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignMedia {
    pub id: u64,
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    #[default]
    Regular,
    Optin,
}

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Running,
    Paused,
    Cancelled,
    Finished,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Running => "running",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Cancelled => "cancelled",
            CampaignStatus::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Body format of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignContentType {
    #[default]
    Richtext,
    Html,
    Markdown,
    Plain,
    Visual,
}

impl Campaign {
    /// Whether the campaign is currently sending.
    pub fn is_running(&self) -> bool {
        self.status == CampaignStatus::Running
    }

    pub fn list_ids(&self) -> Vec<u64> {
        self.lists.iter().map(|l| l.id).collect()
    }

    /// Sent messages as a fraction of the target, if the target is known.
    pub fn progress(&self) -> Option<f64> {
        if self.to_send == 0 {
            return None;
        }
        Some(self.sent as f64 / self.to_send as f64)
    }

    /// Rendered HTML preview of this campaign.
    pub async fn preview(&self, client: &ListmonkClient) -> Result<String> {
        get_campaign_preview(client, self.id).await
    }
}

/// Query parameters for searching campaigns.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignListQuery {
    /// Full-text search over name and subject.
    pub query: Option<String>,

    /// Repeated `status` filter.
    pub status: Vec<CampaignStatus>,

    /// Repeated `tags` filter.
    pub tags: Vec<String>,

    /// Sort field: `name`, `status`, `created_at` or `updated_at`.
    pub order_by: Option<String>,

    pub order: Option<SortOrder>,

    pub page: Option<u32>,

    pub per_page: Option<PerPage>,

    /// Leave campaign bodies out of the response.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_body: bool,
}

/// Parameters for creating or updating a campaign.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignParams {
    pub name: String,

    pub subject: String,

    pub lists: Vec<u64>,

    /// Defaults to the server's configured sender.
    pub from_email: Option<String>,

    #[serde(rename = "type")]
    pub campaign_type: CampaignType,

    pub content_type: CampaignContentType,

    pub body: String,

    pub body_source: Option<String>,

    /// Plain text alternative for HTML and richtext bodies.
    pub altbody: Option<String>,

    /// Schedule the campaign; unset means send on start.
    pub send_at: Option<DateTime<Utc>>,

    /// `email` unless a custom messenger is configured.
    pub messenger: Option<String>,

    /// Defaults to the default template.
    pub template_id: Option<u64>,

    pub tags: Vec<String>,

    pub headers: Vec<Map<String, Value>>,
}

/// Public archive settings of a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveParams {
    pub archive: bool,

    #[serde(default)]
    pub archive_template_id: Option<u64>,

    /// Subscriber-like data used when rendering the archived message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub archive_meta: Map<String, Value>,

    /// URL slug of the archive page.
    #[serde(default)]
    pub archive_slug: Option<String>,
}

/// Metric family for [`get_campaign_analytics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsType {
    Views,
    Clicks,
    Links,
    Bounces,
}

impl fmt::Display for AnalyticsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalyticsType::Views => "views",
            AnalyticsType::Clicks => "clicks",
            AnalyticsType::Links => "links",
            AnalyticsType::Bounces => "bounces",
        };
        f.write_str(s)
    }
}

/// Campaigns and date range for [`get_campaign_analytics`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyticsQuery {
    pub id: Vec<u64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct NoBody {
    no_body: bool,
}

#[derive(Serialize)]
struct TestRecipients<'a> {
    subscribers: &'a [String],
}

#[derive(Serialize)]
struct StatusChange {
    status: CampaignStatus,
}

#[async_trait]
impl Get for Campaign {
    #[tracing::instrument(skip(client))]
    async fn get(client: &ListmonkClient, id: u64) -> Result<Self> {
        get_campaign(client, id, false).await
    }
}

#[async_trait]
impl List for Campaign {
    type Query = CampaignListQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &ListmonkClient, query: &Self::Query) -> Result<Page<Self>> {
        routes::GET_CAMPAIGNS.call_with(client, &[], query).await
    }
}

#[async_trait]
impl Create for Campaign {
    type Params = CampaignParams;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &ListmonkClient, params: Self::Params) -> Result<Self> {
        routes::CREATE_CAMPAIGN.call_with(client, &[], &params).await
    }
}

#[async_trait]
impl Update for Campaign {
    type Params = CampaignParams;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &ListmonkClient, id: u64, params: Self::Params) -> Result<Self> {
        routes::UPDATE_CAMPAIGN.call_with(client, &[&id], &params).await
    }
}

#[async_trait]
impl Delete for Campaign {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ListmonkClient, id: u64) -> Result<bool> {
        routes::DELETE_CAMPAIGN.call(client, &[&id]).await
    }
}

/// Fetch one campaign, optionally without its body.
#[tracing::instrument(skip(client))]
pub async fn get_campaign(client: &ListmonkClient, id: u64, no_body: bool) -> Result<Campaign> {
    routes::GET_CAMPAIGN
        .call_with(client, &[&id], &NoBody { no_body })
        .await
}

/// Rendered HTML preview of a campaign.
#[tracing::instrument(skip(client))]
pub async fn get_campaign_preview(client: &ListmonkClient, id: u64) -> Result<String> {
    routes::GET_CAMPAIGN_PREVIEW.call(client, &[&id]).await
}

/// Live sending stats for running campaigns. The row shape is not
/// documented by listmonk, so rows are returned as raw JSON.
#[tracing::instrument(skip(client))]
pub async fn get_running_campaign_stats(
    client: &ListmonkClient,
    ids: &[u64],
) -> Result<Vec<Value>> {
    routes::GET_RUNNING_CAMPAIGN_STATS
        .call_with(client, &[], &IdQuery { id: ids })
        .await
}

/// Time series of views, clicks, link hits or bounces for campaigns.
#[tracing::instrument(skip(client))]
pub async fn get_campaign_analytics(
    client: &ListmonkClient,
    kind: AnalyticsType,
    query: &AnalyticsQuery,
) -> Result<Vec<Map<String, Value>>> {
    routes::GET_CAMPAIGN_ANALYTICS
        .call_with(client, &[&kind], query)
        .await
}

/// Send a campaign to the given addresses as a test.
#[tracing::instrument(skip(client))]
pub async fn test_campaign(
    client: &ListmonkClient,
    id: u64,
    subscribers: &[String],
) -> Result<bool> {
    routes::TEST_CAMPAIGN
        .call_with(client, &[&id], &TestRecipients { subscribers })
        .await
}

/// Start, pause, cancel or schedule a campaign.
#[tracing::instrument(skip(client))]
pub async fn change_campaign_status(
    client: &ListmonkClient,
    id: u64,
    status: CampaignStatus,
) -> Result<Campaign> {
    routes::CHANGE_CAMPAIGN_STATUS
        .call_with(client, &[&id], &StatusChange { status })
        .await
}

/// Publish a campaign to (or withdraw it from) the public archive.
#[tracing::instrument(skip(client, params))]
pub async fn archive_campaign(
    client: &ListmonkClient,
    id: u64,
    params: &ArchiveParams,
) -> Result<ArchiveParams> {
    routes::ARCHIVE_CAMPAIGN
        .call_with(client, &[&id], params)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_campaign_deserialize() {
        let json = r#"{
            "id": 1,
            "created_at": "2020-03-14T17:36:41.29451+01:00",
            "updated_at": "2020-03-14T17:36:41.29451+01:00",
            "views": 0,
            "clicks": 0,
            "lists": [{"id": 1, "name": "Default list"}],
            "started_at": null,
            "to_send": 0,
            "sent": 0,
            "uuid": "57702beb-6fae-4355-a324-c2fd5b59a549",
            "type": "regular",
            "name": "Test campaign",
            "subject": "Welcome to listmonk",
            "from_email": "No Reply <noreply@yoursite.com>",
            "body": "<h3>Hi {{ .Subscriber.FirstName }}!</h3>",
            "send_at": "2020-03-15T17:36:41.293921+01:00",
            "status": "draft",
            "content_type": "richtext",
            "tags": ["test-campaign"],
            "template_id": 1,
            "messenger": "email",
            "headers": [{"X-Custom": "1"}],
            "media": null
        }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.status, CampaignStatus::Draft);
        assert_eq!(campaign.campaign_type, CampaignType::Regular);
        assert_eq!(campaign.list_ids(), vec![1]);
        assert!(campaign.media.is_empty());
        assert!(campaign.started_at.is_none());
        assert!(campaign.send_at.is_some());
        assert_eq!(campaign.headers[0]["X-Custom"], "1");
        assert_eq!(campaign.progress(), None);
    }

    #[test]
    fn test_campaign_progress() {
        let campaign: Campaign = serde_json::from_str(
            r#"{"id": 2, "name": "x", "status": "running", "sent": 25, "to_send": 100}"#,
        )
        .unwrap();
        assert!(campaign.is_running());
        assert_eq!(campaign.progress(), Some(0.25));
    }

    #[test]
    fn test_list_query_no_body_and_statuses() {
        let query = CampaignListQuery {
            status: vec![CampaignStatus::Running, CampaignStatus::Paused],
            no_body: true,
            ..Default::default()
        };
        let pairs = crate::query::encode(&query).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("no_body".to_string(), "true".to_string()),
                ("status".to_string(), "running".to_string()),
                ("status".to_string(), "paused".to_string()),
            ]
        );
    }

    #[test]
    fn test_params_skip_unset_schedule() {
        let params = CampaignParams {
            name: "Launch".to_string(),
            subject: "Hello".to_string(),
            lists: vec![1, 2],
            body: "<p>hi</p>".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], "regular");
        assert_eq!(json["content_type"], "richtext");
        assert!(json.get("send_at").is_none());
        assert!(json.get("template_id").is_none());

        let scheduled = CampaignParams {
            send_at: Some(Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap()),
            ..params
        };
        let json = serde_json::to_value(&scheduled).unwrap();
        assert_eq!(json["send_at"], "2030-01-02T03:04:05Z");
    }

    #[test]
    fn test_analytics_path_and_query() {
        assert_eq!(
            routes::GET_CAMPAIGN_ANALYTICS.render(&[&AnalyticsType::Links]),
            "/api/campaigns/analytics/links"
        );
        let pairs = crate::query::encode(&AnalyticsQuery {
            id: vec![1, 2],
            from: None,
            to: None,
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("id".to_string(), "1".to_string()),
                ("id".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_archive_params_round_trip() {
        let params: ArchiveParams =
            serde_json::from_str(r#"{"archive": true, "archive_meta": null, "archive_slug": "may"}"#)
                .unwrap();
        assert!(params.archive);
        assert!(params.archive_meta.is_empty());
        assert_eq!(params.archive_slug.as_deref(), Some("may"));
    }

    #[test]
    fn test_status_display_matches_wire() {
        for status in [CampaignStatus::Scheduled, CampaignStatus::Cancelled] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, status.to_string());
        }
    }
}
