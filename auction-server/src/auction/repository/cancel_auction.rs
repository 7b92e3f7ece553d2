use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    /// Terminal compare-and-set of the cancelled flag. Returns false when the
    /// auction was already concluded or cancelled.
    pub async fn cancel_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<bool, RestError> {
        let updated = self.db.cancel_auction(auction_id).await?;
        if updated {
            if let Some(auction) = self
                .in_memory_store
                .auctions
                .write()
                .await
                .get_mut(&auction_id)
            {
                auction.cancelled = true;
                auction.status_cache = entities::AuctionStatus::Cancelled;
            }
        }
        Ok(updated)
    }
}
