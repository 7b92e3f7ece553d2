use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
        batch::entities::BatchId,
    },
};

impl Repository {
    /// All auctions ever opened against a batch. Rows from storage are
    /// overlaid with the in-memory copies, which may carry fresher state.
    pub async fn get_auctions_by_batch(
        &self,
        batch_id: BatchId,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let mut auctions = Vec::new();
        for model in self.db.get_auctions_by_batch(batch_id).await? {
            let auction = model.get_auction_entity().map_err(|e| {
                tracing::error!(
                    error = e.to_string(),
                    batch_id = batch_id.to_string(),
                    "Failed to convert auction row to entity"
                );
                RestError::TemporarilyUnavailable
            })?;
            auctions.push(auction);
        }

        let read_guard = self.in_memory_store.auctions.read().await;
        for auction in auctions.iter_mut() {
            if let Some(in_memory) = read_guard.get(&auction.id) {
                *auction = in_memory.clone();
            }
        }
        for auction in read_guard.values() {
            if auction.batch_id == batch_id && !auctions.iter().any(|a| a.id == auction.id) {
                auctions.push(auction.clone());
            }
        }
        Ok(auctions)
    }
}
