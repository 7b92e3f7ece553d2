use {
    crate::{
        auction::entities::AuctionId,
        kernel::entities::{
            Amount,
            BidderId,
        },
    },
    salvage_auction_api_types::bid as api_types,
    std::sync::Arc,
    strum::Display,
    time::OffsetDateTime,
    tokio::sync::{
        Mutex,
        RwLock,
    },
    uuid::Uuid,
};

pub type BidId = Uuid;
/// Serializes supersede-then-insert per (auction, bidder) pair.
pub type BidLock = Arc<Mutex<()>>;
/// Placements hold this per-auction lock shared; an administrative cancel
/// takes it exclusively so no bid can slip in next to the cancellation.
pub type AdmissionLock = Arc<RwLock<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BidStatus {
    /// The bidder's current standing bid in the auction.
    Active,
    /// Superseded by the bidder's own later bid, or demoted at resolution.
    Outbid,
    /// Selected as a winning bid at resolution.
    Winning,
    /// Voided by an administrative cancellation of the auction.
    Cancelled,
}

impl BidStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, BidStatus::Active)
    }
}

#[derive(Clone, Debug)]
pub struct Bid {
    pub id:         BidId,
    pub auction_id: AuctionId,
    pub bidder:     BidderId,
    pub amount:     Amount,
    pub bid_time:   OffsetDateTime,
    pub note:       Option<String>,
    pub status:     BidStatus,
}

#[derive(Clone, Debug)]
pub struct BidCreate {
    pub auction_id: AuctionId,
    pub bidder:     BidderId,
    pub amount:     Amount,
    pub note:       Option<String>,
}

impl From<BidStatus> for api_types::BidStatus {
    fn from(status: BidStatus) -> Self {
        match status {
            BidStatus::Active => api_types::BidStatus::Active,
            BidStatus::Outbid => api_types::BidStatus::Outbid,
            BidStatus::Winning => api_types::BidStatus::Winning,
            BidStatus::Cancelled => api_types::BidStatus::Cancelled,
        }
    }
}

impl From<Bid> for api_types::Bid {
    fn from(bid: Bid) -> Self {
        Self {
            id:         bid.id,
            auction_id: bid.auction_id,
            bidder:     bid.bidder,
            amount:     bid.amount,
            bid_time:   bid.bid_time,
            note:       bid.note,
            status:     bid.status.into(),
        }
    }
}
