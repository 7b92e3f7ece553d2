use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities::{
                Auction,
                AuctionStatus,
            },
            service::get_auction::GetAuctionInput,
        },
        bid::entities,
    },
    time::OffsetDateTime,
};

pub struct VerifyBidInput {
    pub bid_create: entities::BidCreate,
}

impl Service {
    /// Admission control for a bid. Must run while the caller holds the
    /// admission and bid locks: the status read and the insert decision have
    /// to be part of one logical operation, or a concurrent cancel could let
    /// a bid slip in after the fact.
    pub(super) async fn verify_bid(&self, input: VerifyBidInput) -> Result<Auction, RestError> {
        let store = self.get_store();
        let auction = store
            .auction_service
            .get_auction(GetAuctionInput {
                auction_id: input.bid_create.auction_id,
            })
            .await?;

        let status = auction.derive_status(OffsetDateTime::now_utc());
        if status != AuctionStatus::Active {
            return Err(RestError::AuctionNotActive { status });
        }

        match self
            .user_directory
            .get_bidder(input.bid_create.bidder)
            .await?
        {
            Some(bidder) if bidder.approved => {}
            _ => return Err(RestError::BidderNotApproved),
        }

        if input.bid_create.amount < auction.base_price {
            return Err(RestError::BidTooLow {
                minimum: auction.base_price,
            });
        }

        Ok(auction)
    }
}
