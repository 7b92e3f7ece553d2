use {
    super::entities,
    crate::batch::entities::BatchId,
    std::collections::HashMap,
    tokio::sync::{
        Mutex,
        RwLock,
    },
};

mod add_auction;
mod cancel_auction;
mod conclude_auction;
mod get_auction;
mod get_auctions_by_batch;
mod get_or_create_auction_lock;
mod models;
mod update_status_cache;

pub use models::*;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub auctions:     RwLock<HashMap<entities::AuctionId, entities::Auction>>,
    /// Resolution and cancellation are serialized per batch: resolving any
    /// lot settles every lot of the batch in one pass.
    pub auction_lock: Mutex<HashMap<BatchId, entities::AuctionLock>>,
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
