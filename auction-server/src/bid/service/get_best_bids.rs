use {
    super::Service,
    crate::{
        allocation::entities::BestBid,
        api::RestError,
        auction::entities::AuctionId,
    },
};

pub struct GetBestBidsInput {
    pub auction_id: AuctionId,
}

impl Service {
    /// Each bidder's standing offer on an auction, as optimizer input. A
    /// bidder has at most one active bid, so no per-bidder reduction is
    /// needed here.
    pub async fn get_best_bids(&self, input: GetBestBidsInput) -> Result<Vec<BestBid>, RestError> {
        let bids = self.repo.get_bids(input.auction_id).await?;
        Ok(bids
            .iter()
            .filter(|bid| bid.status.is_active())
            .map(|bid| BestBid {
                bidder:   bid.bidder,
                amount:   bid.amount,
                bid_time: bid.bid_time,
            })
            .collect())
    }
}
