use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities::BidStatus,
        kernel::entities::BidderId,
    },
};

pub struct FinalizeAuctionBidsInput {
    pub auction_id: AuctionId,
    /// The bidder whose standing bid won the lot; `None` marks everything
    /// outbid (no-winner resolution, or a lot folded into a bundled award).
    pub winner:     Option<BidderId>,
}

impl Service {
    /// Final bid bookkeeping at resolution: the winner's standing bid becomes
    /// `Winning`, every other active bid is demoted to `Outbid`.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn finalize_auction_bids(
        &self,
        input: FinalizeAuctionBidsInput,
    ) -> Result<(), RestError> {
        tracing::Span::current().record("auction_id", input.auction_id.to_string());
        let bids = self.repo.get_bids(input.auction_id).await?;
        for bid in bids.into_iter().filter(|bid| bid.status.is_active()) {
            let new_status = if input.winner == Some(bid.bidder) {
                BidStatus::Winning
            } else {
                BidStatus::Outbid
            };
            self.repo.update_bid_status(&bid, new_status).await?;
        }
        Ok(())
    }
}
