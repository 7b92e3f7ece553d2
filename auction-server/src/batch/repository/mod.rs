use {
    super::entities,
    std::collections::HashMap,
    tokio::sync::RwLock,
};

mod add_batch;
mod delete_batch;
mod get_batch;
mod get_batches;
mod models;
mod update_batch_status;

pub use models::*;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub batches: RwLock<HashMap<entities::BatchId, entities::Batch>>,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
    db:                  Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db:              Box::new(db),
        }
    }
}
