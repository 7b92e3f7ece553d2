use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
    },
};

impl Repository {
    /// Voids every active bid of an administratively cancelled auction.
    pub async fn cancel_active_bids(&self, auction_id: AuctionId) -> Result<(), RestError> {
        self.db.cancel_active_bids(auction_id).await?;
        if let Some(bids) = self
            .in_memory_store
            .bids
            .write()
            .await
            .get_mut(&auction_id)
        {
            for bid in bids.iter_mut().filter(|b| b.status.is_active()) {
                bid.status = entities::BidStatus::Cancelled;
            }
        }
        Ok(())
    }
}
