use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    /// Best-effort persistence of the derived status. The cache is never
    /// consulted for admission or resolution decisions.
    pub async fn update_status_cache(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<(), RestError> {
        self.db
            .update_status_cache(auction_id, status.into())
            .await?;
        if let Some(auction) = self
            .in_memory_store
            .auctions
            .write()
            .await
            .get_mut(&auction_id)
        {
            if !auction.cancelled && !auction.is_concluded() {
                auction.status_cache = status;
            }
        }
        Ok(())
    }
}
