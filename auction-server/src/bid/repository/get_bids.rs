use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
    },
};

impl Repository {
    /// Snapshot of all bids against an auction. Falls back to storage the
    /// first time an auction is seen after a restart.
    pub async fn get_bids(&self, auction_id: AuctionId) -> Result<Vec<entities::Bid>, RestError> {
        if let Some(bids) = self.in_memory_store.bids.read().await.get(&auction_id) {
            return Ok(bids.clone());
        }

        let mut bids = Vec::new();
        for model in self.db.get_bids(auction_id).await? {
            let bid = model.get_bid_entity().map_err(|e| {
                tracing::error!(
                    error = e.to_string(),
                    auction_id = auction_id.to_string(),
                    "Failed to convert bid row to entity"
                );
                RestError::TemporarilyUnavailable
            })?;
            bids.push(bid);
        }
        self.in_memory_store
            .bids
            .write()
            .await
            .entry(auction_id)
            .or_insert_with(|| bids.clone());
        Ok(bids)
    }
}
