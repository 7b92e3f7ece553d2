use {
    super::{
        models,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
    ) -> Result<entities::Auction, RestError> {
        self.db.add_auction(&models::Auction::new(&auction)).await?;

        self.in_memory_store
            .auctions
            .write()
            .await
            .insert(auction.id, auction.clone());
        Ok(auction)
    }
}
