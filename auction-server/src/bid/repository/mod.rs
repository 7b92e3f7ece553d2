use {
    super::entities,
    crate::{
        auction::entities::AuctionId,
        kernel::entities::BidderId,
    },
    std::collections::HashMap,
    tokio::sync::{
        Mutex,
        RwLock,
    },
};

mod add_bid;
mod cancel_active_bids;
mod get_active_bid;
mod get_bids;
mod get_or_create_bid_lock;
mod models;
mod update_bid_status;

pub use models::*;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub bids:           RwLock<HashMap<AuctionId, Vec<entities::Bid>>>,
    /// Serializes supersede-then-insert per (auction, bidder).
    pub bid_lock:       Mutex<HashMap<(AuctionId, BidderId), entities::BidLock>>,
    /// Placements take this shared; cancellation takes it exclusively so a
    /// bid can never be admitted next to a concurrent cancel.
    pub admission_lock: Mutex<HashMap<AuctionId, entities::AdmissionLock>>,
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
