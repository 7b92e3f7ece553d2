use {
    super::Repository,
    crate::{
        auction::entities,
        batch::entities::BatchId,
    },
};

impl Repository {
    pub async fn get_or_create_auction_lock(&self, batch_id: BatchId) -> entities::AuctionLock {
        self.in_memory_store
            .auction_lock
            .lock()
            .await
            .entry(batch_id)
            .or_default()
            .clone()
    }
}
