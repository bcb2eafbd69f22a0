//! Storage port for the reception queue.
//!
//! The dispatcher itself is synchronous and storage-agnostic; the service
//! loads one snapshot at startup and saves one after every mutation.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reception::models::ReceptionSnapshot;

pub use memory::InMemoryReceptionStore;
pub use postgres::PgReceptionStore;

#[async_trait]
pub trait ReceptionStore: Send + Sync {
    /// The last saved snapshot, or `None` on first start
    async fn load(&self) -> Result<Option<ReceptionSnapshot>>;

    async fn save(&self, snapshot: &ReceptionSnapshot) -> Result<()>;
}
