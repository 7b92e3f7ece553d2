use {
    crate::{
        allocation::AllocationPlan,
        batch::{
            BatchId,
            Medium,
        },
        Amount,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::Display,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type AuctionId = Uuid;

/// What a single auction sells: one medium lot of a batch, or the batch as a whole.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuctionLot {
    #[schema(title = "WholeBatch")]
    WholeBatch,
    #[schema(title = "Medium")]
    Medium { medium: Medium },
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuctionStatus {
    Pending,
    Active,
    Ended,
    Cancelled,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AuctionCreate {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub batch_id:      BatchId,
    pub lot:           AuctionLot,
    /// Bidding opens at this time, formatted in rfc3339.
    #[schema(example = "2026-05-23T09:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub start_time:    OffsetDateTime,
    /// Bidding closes at this time; must be strictly after the start time.
    #[schema(example = "2026-05-30T09:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_time:      OffsetDateTime,
    /// Minimum acceptable bid in minor units.
    #[schema(example = 10000)]
    pub base_price:    Amount,
    /// Minimum acceptable winning bid in minor units, if set.
    #[schema(example = 25000)]
    pub reserve_price: Option<Amount>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct AuctionWinner {
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bidder: Uuid,
    #[schema(example = 125000)]
    pub amount: Amount,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Auction {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:              AuctionId,
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub batch_id:        BatchId,
    pub lot:             AuctionLot,
    #[schema(example = "2026-05-23T09:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub start_time:      OffsetDateTime,
    #[schema(example = "2026-05-30T09:00:00Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_time:        OffsetDateTime,
    #[schema(example = 10000)]
    pub base_price:      Amount,
    #[schema(example = 25000)]
    pub reserve_price:   Option<Amount>,
    /// The status derived from the clock at the time of the read.
    pub status:          AuctionStatus,
    pub winner:          Option<AuctionWinner>,
    #[schema(example = "2026-05-30T09:00:02Z", value_type = Option<String>)]
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub conclusion_time: Option<OffsetDateTime>,
}

/// Live view of an auction for operator and bidder display.
#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct AuctionSummary {
    pub auction:            Auction,
    /// Highest currently-active bid amount, if any bids were placed.
    #[schema(example = 55000)]
    pub highest_active_bid: Option<Amount>,
    #[schema(example = 4)]
    pub active_bid_count:   u32,
    /// Seconds until the auction closes; only present while the auction is active.
    #[schema(example = 86400)]
    pub time_remaining_secs: Option<u64>,
}

/// Result of resolving an auction.
#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The batch was awarded according to the returned allocation plan.
    #[schema(title = "Resolved")]
    Resolved {
        /// The winner recorded on the requested auction; absent when the plan
        /// awarded this lot to nobody (e.g. a lot auction under a bundled plan).
        winner: Option<AuctionWinner>,
        plan:   AllocationPlan,
    },
    /// The best bid did not meet a reserve price; nothing was awarded.
    #[schema(title = "NoEligibleWinner")]
    NoEligibleWinner {
        /// The winning figure of the chosen strategy, if any bids existed.
        #[schema(example = 20000)]
        highest:       Option<Amount>,
        /// The reserve price that was not met, if one was set.
        #[schema(example = 25000)]
        reserve_price: Option<Amount>,
    },
    /// The auction had already been resolved; the recorded result is returned.
    #[schema(title = "AlreadyResolved")]
    AlreadyResolved { winner: Option<AuctionWinner> },
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct AuctionPathParams {
    /// The id of the auction.
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id: AuctionId,
}
