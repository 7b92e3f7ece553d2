use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    pub async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<Option<entities::Auction>, RestError> {
        if let Some(auction) = self.in_memory_store.auctions.read().await.get(&auction_id) {
            return Ok(Some(auction.clone()));
        }

        match self.db.get_auction(auction_id).await? {
            Some(model) => {
                let auction = model.get_auction_entity().map_err(|e| {
                    tracing::error!(
                        error = e.to_string(),
                        auction_id = auction_id.to_string(),
                        "Failed to convert auction row to entity"
                    );
                    RestError::TemporarilyUnavailable
                })?;
                self.in_memory_store
                    .auctions
                    .write()
                    .await
                    .insert(auction.id, auction.clone());
                Ok(Some(auction))
            }
            None => Ok(None),
        }
    }
}
