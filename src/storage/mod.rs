//! Storage layer
//!
//! `ServerStore` is the capability surface the router depends on. The mongo
//! implementation is the production backend; the in-memory one backs tests
//! and runs without a database.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{NewServer, Server};

/// Server record store
#[async_trait]
pub trait ServerStore: Send + Sync {
    /// Insert a new record and return its backend-assigned id.
    async fn create(&self, server: NewServer) -> StoreResult<String>;

    /// Fetch a record by its hex id.
    async fn get(&self, id: &str) -> StoreResult<Server>;

    /// Release the underlying connection. Safe to call more than once.
    async fn close(&self) -> StoreResult<()>;
}
