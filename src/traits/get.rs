//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::ListmonkClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use listmonk_api::{ListmonkClient, Subscriber, Get};
///
/// let client = ListmonkClient::from_env()?;
/// let subscriber = Subscriber::get(&client, 42).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// Fetch the entity by its numeric ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &ListmonkClient, id: u64) -> Result<Self>;
}
