use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
    },
};

impl Repository {
    /// Moves a bid out of `Active`; returns whether anything changed. Used by
    /// resolution to mark winners and demote the rest.
    pub async fn update_bid_status(
        &self,
        bid: &entities::Bid,
        new_status: entities::BidStatus,
    ) -> Result<bool, RestError> {
        let is_updated = self.db.update_bid_status(bid.id, new_status.into()).await?;
        if is_updated {
            if let Some(bids) = self
                .in_memory_store
                .bids
                .write()
                .await
                .get_mut(&bid.auction_id)
            {
                if let Some(stored) = bids.iter_mut().find(|b| b.id == bid.id) {
                    stored.status = new_status;
                }
            }
        }
        Ok(is_updated)
    }
}
