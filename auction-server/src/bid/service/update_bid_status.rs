use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
    },
};

pub struct UpdateBidStatusInput {
    pub bid:        entities::Bid,
    pub new_status: entities::BidStatus,
}

impl Service {
    #[tracing::instrument(skip_all, fields(bid_id, status))]
    pub async fn update_bid_status(&self, input: UpdateBidStatusInput) -> Result<bool, RestError> {
        tracing::Span::current().record("bid_id", input.bid.id.to_string());
        tracing::Span::current().record("status", input.new_status.to_string());
        self.repo
            .update_bid_status(&input.bid, input.new_status)
            .await
    }
}
