use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
        kernel::entities::BidderId,
    },
};

impl Repository {
    /// The bidder's standing bid in an auction, if they have one. Goes
    /// through the ledger snapshot so the in-memory store is warmed from
    /// storage on the first touch after a restart.
    pub async fn get_active_bid(
        &self,
        auction_id: AuctionId,
        bidder: BidderId,
    ) -> Result<Option<entities::Bid>, RestError> {
        let bids = self.get_bids(auction_id).await?;
        Ok(bids
            .into_iter()
            .find(|bid| bid.bidder == bidder && bid.status.is_active()))
    }
}
