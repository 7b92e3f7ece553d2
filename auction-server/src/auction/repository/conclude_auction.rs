use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
    time::OffsetDateTime,
};

impl Repository {
    /// Terminal compare-and-set: records the winner (if any) and conclusion
    /// time unless another caller concluded or cancelled the auction first.
    #[tracing::instrument(skip_all, name = "conclude_auction_repo", fields(auction_id))]
    pub async fn conclude_auction(
        &self,
        auction_id: entities::AuctionId,
        winner: Option<entities::AuctionWinner>,
        conclusion_time: OffsetDateTime,
    ) -> Result<bool, RestError> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        let updated = self
            .db
            .conclude_auction(auction_id, winner.clone(), conclusion_time)
            .await?;
        if updated {
            if let Some(auction) = self
                .in_memory_store
                .auctions
                .write()
                .await
                .get_mut(&auction_id)
            {
                auction.winner = winner;
                auction.conclusion_time = Some(conclusion_time);
                auction.status_cache = entities::AuctionStatus::Ended;
            }
        }
        Ok(updated)
    }
}
