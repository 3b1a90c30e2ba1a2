//! List trait for fetching one page of entities.

use async_trait::async_trait;

use crate::client::ListmonkClient;
use crate::error::Result;
use crate::pagination::Page;

/// Search entities, one page per call.
///
/// Paging is driven by the `page`/`per_page` fields of the query; there is
/// no automatic traversal.
///
/// # Example
///
/// ```ignore
/// use listmonk_api::{ListmonkClient, Subscriber, SubscriberListQuery, List};
///
/// let client = ListmonkClient::from_env()?;
/// let page = Subscriber::list(&client, &SubscriberListQuery {
///     page: Some(2),
///     ..Default::default()
/// }).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering and paging.
    type Query: Default + Send + Sync;

    /// Fetch the page selected by `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(client: &ListmonkClient, query: &Self::Query) -> Result<Page<Self>>;
}
