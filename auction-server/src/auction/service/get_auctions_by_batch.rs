use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        batch::entities::BatchId,
    },
};

pub struct GetAuctionsByBatchInput {
    pub batch_id: BatchId,
}

impl Service {
    pub async fn get_auctions_by_batch(
        &self,
        input: GetAuctionsByBatchInput,
    ) -> Result<Vec<entities::Auction>, RestError> {
        self.repo.get_auctions_by_batch(input.batch_id).await
    }
}
