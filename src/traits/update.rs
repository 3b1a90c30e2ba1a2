//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::ListmonkClient;
use crate::error::Result;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use listmonk_api::{ListmonkClient, MailingList, MailingListParams, Update};
///
/// let client = ListmonkClient::from_env()?;
/// let updated = MailingList::update(
///     &client,
///     3,
///     MailingListParams {
///         name: "Weekly digest".to_string(),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// Parameters for the update.
    type Params: Send + Sync;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &ListmonkClient, id: u64, params: Self::Params) -> Result<Self>;
}
