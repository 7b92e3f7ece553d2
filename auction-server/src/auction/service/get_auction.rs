use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        bid::service::{
            get_active_bid_count::GetActiveBidCountInput,
            get_highest_active_bid::GetHighestActiveBidInput,
        },
    },
    time::OffsetDateTime,
};

pub struct GetAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    pub async fn get_auction(&self, input: GetAuctionInput) -> Result<entities::Auction, RestError> {
        self.repo
            .get_auction(input.auction_id)
            .await?
            .ok_or(RestError::AuctionNotFound)
    }

    /// Live view for display: derived status, highest active bid, active-bid
    /// count and the remaining time on the clock.
    pub async fn get_auction_summary(
        &self,
        input: GetAuctionInput,
    ) -> Result<entities::AuctionSummary, RestError> {
        let auction = self.get_auction(input).await?;
        let now = OffsetDateTime::now_utc();
        let status = auction.derive_status(now);
        self.refresh_status_cache(&auction, status);

        let store = self.get_store();
        let highest_active_bid = store
            .bid_service
            .get_highest_active_bid(GetHighestActiveBidInput {
                auction_id: auction.id,
            })
            .await?;
        let active_bid_count = store
            .bid_service
            .get_active_bid_count(GetActiveBidCountInput {
                auction_id: auction.id,
            })
            .await?;
        Ok(entities::AuctionSummary {
            time_remaining: auction.time_remaining(now),
            auction,
            status,
            highest_active_bid,
            active_bid_count,
        })
    }

    /// Persist the derived status as a cache, off the request path. The cache
    /// may lag; admission and resolution never read it.
    fn refresh_status_cache(&self, auction: &entities::Auction, derived: entities::AuctionStatus) {
        if auction.status_cache == derived || auction.is_concluded() {
            return;
        }
        let repo = self.repo.clone();
        let auction_id = auction.id;
        self.task_tracker.spawn(async move {
            if let Err(e) = repo.update_status_cache(auction_id, derived).await {
                tracing::warn!(
                    error = ?e,
                    auction_id = auction_id.to_string(),
                    "Failed to refresh auction status cache"
                );
            }
        });
    }
}
