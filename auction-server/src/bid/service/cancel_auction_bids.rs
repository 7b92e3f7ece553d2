use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
    },
};

pub struct CancelAuctionBidsInput {
    pub auction_id: AuctionId,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn cancel_auction_bids(
        &self,
        input: CancelAuctionBidsInput,
    ) -> Result<(), RestError> {
        tracing::Span::current().record("auction_id", input.auction_id.to_string());
        self.repo.cancel_active_bids(input.auction_id).await
    }
}
