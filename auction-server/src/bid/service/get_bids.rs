use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
    },
};

pub struct GetBidsInput {
    pub auction_id: AuctionId,
}

impl Service {
    /// Snapshot of the auction's bid history, highest amount first and most
    /// recent first among equal amounts.
    pub async fn get_bids(&self, input: GetBidsInput) -> Result<Vec<entities::Bid>, RestError> {
        let mut bids = self.repo.get_bids(input.auction_id).await?;
        bids.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| b.bid_time.cmp(&a.bid_time))
        });
        Ok(bids)
    }
}
