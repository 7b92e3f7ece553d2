use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
    },
};

pub struct GetActiveBidCountInput {
    pub auction_id: AuctionId,
}

impl Service {
    pub async fn get_active_bid_count(
        &self,
        input: GetActiveBidCountInput,
    ) -> Result<usize, RestError> {
        let bids = self.repo.get_bids(input.auction_id).await?;
        Ok(bids.iter().filter(|bid| bid.status.is_active()).count())
    }
}
