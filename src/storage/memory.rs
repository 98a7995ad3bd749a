//! In-memory store using DashMap
//!
//! Same error contract as the mongo backend, including `BadRequest` on
//! unparsable ids and failures after close, so tests exercise the real
//! status-code mapping.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use super::ServerStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{NewServer, Server};

#[derive(Default)]
pub struct MemoryStore {
    servers: DashMap<String, Document>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Database("store is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ServerStore for MemoryStore {
    async fn create(&self, server: NewServer) -> StoreResult<String> {
        self.check_open()?;
        let id = ObjectId::new().to_hex();
        self.servers.insert(id.clone(), server.into_document());
        Ok(id)
    }

    async fn get(&self, id: &str) -> StoreResult<Server> {
        self.check_open()?;
        let object_id =
            ObjectId::parse_str(id).map_err(|e| StoreError::BadRequest(e.to_string()))?;
        let doc = self
            .servers
            .get(&object_id.to_hex())
            .ok_or(StoreError::NotFound)?;
        Ok(Server {
            id: object_id.to_hex(),
            fields: doc.clone(),
        })
    }

    async fn close(&self) -> StoreResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
