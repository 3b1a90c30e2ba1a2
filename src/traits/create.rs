//! Create trait for adding entities.

use async_trait::async_trait;

use crate::client::ListmonkClient;
use crate::error::Result;

/// Create a new entity.
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the new entity.
    type Params: Send + Sync;

    /// Create the entity and return it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the parameters or the request fails.
    async fn create(client: &ListmonkClient, params: Self::Params) -> Result<Self>;
}
