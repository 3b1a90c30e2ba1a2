//! listmonk API client library.
//!
//! A Rust library for the listmonk newsletter and mailing list manager's
//! REST API. Resource operations (Get, List, Create, Update, Delete) are
//! traits implemented by the entity types; everything else is a plain
//! async function in the entity's module.
//!
//! # Quick Start
//!
//! ```no_run
//! use listmonk_api::{Get, List, ListmonkClient, MailingList, Subscriber, SubscriberListQuery};
//!
//! #[tokio::main]
//! async fn main() -> listmonk_api::Result<()> {
//!     // Create client from environment variables
//!     let client = ListmonkClient::from_env()?;
//!
//!     // Get a list by ID
//!     let list = MailingList::get(&client, 1).await?;
//!     println!("List: {} ({} subscribers)", list.name, list.subscriber_count);
//!
//!     // Search subscribers on that list
//!     let query = SubscriberListQuery {
//!         list_ids: vec![list.id],
//!         ..Default::default()
//!     };
//!     let page = Subscriber::list(&client, &query).await?;
//!     println!("Found {} subscribers", page.total);
//!
//!     // Render a campaign preview
//!     let html = listmonk_api::get_campaign_preview(&client, 1).await?;
//!     println!("{html}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Every listmonk operation is described once, as an [`Endpoint`] constant
//! in [`routes`]: method, path template, how parameters travel (query
//! string, JSON body or multipart form) and the shape of the success body.
//! All of them run through the same call path, which
//!
//! - authenticates with `Authorization: token <api_user>:<token>`,
//! - treats exactly `200 OK` as success,
//! - reads the `{"message": ...}` envelope of failed calls into
//!   [`ListmonkError::Api`],
//! - unwraps the `{"data": ...}` envelope of successful calls, except for
//!   the few endpoints declared [`Bare`] or [`Text`].
//!
//! # Configuration
//!
//! [`ListmonkClient::from_env`] reads:
//!
//! - `LISTMONK_URL` (required) - Root URL of the listmonk install
//! - `LISTMONK_API_USER` (required) - API user name
//! - `LISTMONK_API_TOKEN` (required) - API token for that user
//!
//! # Cancellation
//!
//! [`ListmonkClient::with_cancellation`] binds a
//! [`tokio_util::sync::CancellationToken`] to a client handle; calls on
//! that handle fail with [`ListmonkError::Cancelled`] once it fires.

pub mod cli;
mod client;
mod endpoint;
pub mod envelope;
mod error;
mod models;
mod multipart;
pub mod output;
mod pagination;
mod query;
pub mod routes;
mod traits;

// Re-export core types
pub use client::{ClientConfig, ListmonkClient, Request};
pub use endpoint::{Endpoint, PathArgs, RequestMode};
pub use envelope::{Bare, Data, ResponseShape, Text};
pub use error::{ListmonkError, Result};
pub use multipart::{FileContents, FilePart, MultipartForm};
pub use pagination::{Page, PerPage};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    // Shared
    SortOrder,
    // Subscriber types
    ExportProfile,
    ExportSubscription,
    ListMembershipParams,
    MembershipAction,
    PublicSubscriptionParams,
    Subscriber,
    SubscriberExport,
    SubscriberListQuery,
    SubscriberParams,
    SubscriberQueryParams,
    SubscriberStatus,
    Subscription,
    SubscriptionStatus,
    // List types
    ListOptin,
    ListType,
    MailingList,
    MailingListParams,
    MailingListQuery,
    PublicList,
    // Campaign types
    AnalyticsQuery,
    AnalyticsType,
    ArchiveParams,
    Campaign,
    CampaignContentType,
    CampaignList,
    CampaignListQuery,
    CampaignMedia,
    CampaignParams,
    CampaignStatus,
    CampaignType,
    // Template types
    Template,
    TemplateParams,
    TemplateType,
    // Media types
    Media,
    // Import types
    ImportConfig,
    ImportMode,
    ImportStatus,
    // Transactional types
    ContentType,
    TransactionalMessage,
    // Bounce types
    Bounce,
    BounceCampaign,
    BounceListQuery,
};

// Re-export convenience functions
pub use models::{
    blocklist_subscriber, blocklist_subscribers, blocklist_subscribers_by_query,
    create_public_subscription, delete_subscriber_bounces, delete_subscribers,
    delete_subscribers_by_query, export_subscriber, get_subscriber_bounces,
    send_optin_confirmation, update_list_memberships,
};
pub use models::get_public_lists;
pub use models::{
    archive_campaign, change_campaign_status, get_campaign, get_campaign_analytics,
    get_campaign_preview, get_running_campaign_stats, test_campaign,
};
pub use models::{get_template_preview, get_templates, set_default_template};
pub use models::{get_media_list, upload_media, upload_media_file};
pub use models::{
    abort_import, get_import_logs, get_import_status, import_subscribers,
    import_subscribers_file,
};
pub use models::send_transactional;
pub use models::{delete_all_bounces, delete_bounces};
