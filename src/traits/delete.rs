//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::ListmonkClient;
use crate::error::Result;

/// Delete an entity by ID.
#[async_trait]
pub trait Delete {
    /// Delete the entity; returns the server's acknowledgement flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn delete(client: &ListmonkClient, id: u64) -> Result<bool>;
}
