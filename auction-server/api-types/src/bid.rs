use {
    crate::{
        auction::AuctionId,
        Amount,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::Display,
    time::OffsetDateTime,
    utoipa::{
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type BidId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug, Display)]
#[serde(rename_all = "snake_case")]
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

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BidCreate {
    /// The bidder identity as issued by the user directory.
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bidder: Uuid,
    /// Bid amount in minor units. Must be at least the auction's base price.
    #[schema(example = 55000)]
    pub amount: Amount,
    #[schema(example = "can collect within 48h")]
    pub note:   Option<String>,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Bid {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:         BidId,
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id: AuctionId,
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bidder:     Uuid,
    #[schema(example = 55000)]
    pub amount:     Amount,
    /// The time the server accepted the bid formatted in rfc3339.
    #[schema(example = "2026-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub bid_time:   OffsetDateTime,
    pub note:       Option<String>,
    pub status:     BidStatus,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone)]
pub struct BidResult {
    /// The status of the request. If the bid was placed successfully, the status will be "OK".
    #[schema(example = "OK")]
    pub status: String,
    /// The unique id created to identify the bid.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:     BidId,
}
