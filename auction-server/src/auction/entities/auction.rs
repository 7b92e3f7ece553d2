use {
    crate::{
        allocation::entities::AllocationPlan,
        batch::entities::{
            BatchId,
            Medium,
        },
        bid::entities::Bid,
        kernel::entities::{
            Amount,
            BidderId,
        },
    },
    salvage_auction_api_types::auction as api_types,
    serde::{
        Deserialize,
        Serialize,
    },
    std::sync::Arc,
    strum::Display,
    time::{
        Duration,
        OffsetDateTime,
    },
    tokio::sync::Mutex,
    uuid::Uuid,
};

pub type AuctionId = Uuid;
/// Serializes resolution and cancellation per batch.
pub type AuctionLock = Arc<Mutex<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuctionLot {
    WholeBatch,
    Medium { medium: Medium },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuctionStatus {
    Pending,
    Active,
    Ended,
    Cancelled,
}

/// Derive the live status of an auction from the clock. The persisted status
/// is a cache; every admission or resolution decision goes through here.
pub fn derive_status(
    now: OffsetDateTime,
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
    cancelled: bool,
) -> AuctionStatus {
    if cancelled {
        AuctionStatus::Cancelled
    } else if now < start_time {
        AuctionStatus::Pending
    } else if now < end_time {
        AuctionStatus::Active
    } else {
        AuctionStatus::Ended
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuctionWinner {
    pub bidder: BidderId,
    pub amount: Amount,
}

#[derive(Clone, Debug)]
pub struct Auction {
    pub id:              AuctionId,
    pub batch_id:        BatchId,
    pub lot:             AuctionLot,
    pub start_time:      OffsetDateTime,
    pub end_time:        OffsetDateTime,
    pub base_price:      Amount,
    pub reserve_price:   Option<Amount>,
    pub cancelled:       bool,
    /// Best-effort cache of the derived status, refreshed on reads.
    pub status_cache:    AuctionStatus,
    pub winner:          Option<AuctionWinner>,
    pub conclusion_time: Option<OffsetDateTime>,
    pub creation_time:   OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub batch_id:      BatchId,
    pub lot:           AuctionLot,
    pub start_time:    OffsetDateTime,
    pub end_time:      OffsetDateTime,
    pub base_price:    Amount,
    pub reserve_price: Option<Amount>,
}

impl Auction {
    pub fn new(create: AuctionCreate, creation_time: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            batch_id: create.batch_id,
            lot: create.lot,
            start_time: create.start_time,
            end_time: create.end_time,
            base_price: create.base_price,
            reserve_price: create.reserve_price,
            cancelled: false,
            status_cache: derive_status(
                creation_time,
                create.start_time,
                create.end_time,
                false,
            ),
            winner: None,
            conclusion_time: None,
            creation_time,
        }
    }

    pub fn derive_status(&self, now: OffsetDateTime) -> AuctionStatus {
        derive_status(now, self.start_time, self.end_time, self.cancelled)
    }

    pub fn is_concluded(&self) -> bool {
        self.conclusion_time.is_some()
    }

    /// Time left on the clock; only meaningful while the auction is active.
    pub fn time_remaining(&self, now: OffsetDateTime) -> Option<Duration> {
        match self.derive_status(now) {
            AuctionStatus::Active => Some(self.end_time - now),
            _ => None,
        }
    }
}

/// Live view of an auction assembled for display.
#[derive(Clone, Debug)]
pub struct AuctionSummary {
    pub auction:            Auction,
    pub status:             AuctionStatus,
    pub highest_active_bid: Option<Bid>,
    pub active_bid_count:   usize,
    pub time_remaining:     Option<Duration>,
}

/// Result of resolving an auction, batch-scoped: resolving any lot of a batch
/// settles every lot of that batch in the same pass.
#[derive(Clone, Debug)]
pub enum Resolution {
    Resolved {
        /// Winner recorded on the requested auction; `None` when the plan
        /// awarded this lot to nobody (e.g. a lot under a bundled plan).
        winner: Option<AuctionWinner>,
        plan:   AllocationPlan,
    },
    NoEligibleWinner {
        highest:       Option<Amount>,
        reserve_price: Option<Amount>,
    },
    AlreadyResolved {
        winner: Option<AuctionWinner>,
    },
}

impl From<api_types::AuctionLot> for AuctionLot {
    fn from(lot: api_types::AuctionLot) -> Self {
        match lot {
            api_types::AuctionLot::WholeBatch => AuctionLot::WholeBatch,
            api_types::AuctionLot::Medium { medium } => AuctionLot::Medium {
                medium: medium.into(),
            },
        }
    }
}

impl From<AuctionLot> for api_types::AuctionLot {
    fn from(lot: AuctionLot) -> Self {
        match lot {
            AuctionLot::WholeBatch => api_types::AuctionLot::WholeBatch,
            AuctionLot::Medium { medium } => api_types::AuctionLot::Medium {
                medium: medium.into(),
            },
        }
    }
}

impl From<AuctionStatus> for api_types::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Pending => api_types::AuctionStatus::Pending,
            AuctionStatus::Active => api_types::AuctionStatus::Active,
            AuctionStatus::Ended => api_types::AuctionStatus::Ended,
            AuctionStatus::Cancelled => api_types::AuctionStatus::Cancelled,
        }
    }
}

impl From<AuctionWinner> for api_types::AuctionWinner {
    fn from(winner: AuctionWinner) -> Self {
        Self {
            bidder: winner.bidder,
            amount: winner.amount,
        }
    }
}

impl From<api_types::AuctionCreate> for AuctionCreate {
    fn from(create: api_types::AuctionCreate) -> Self {
        Self {
            batch_id:      create.batch_id,
            lot:           create.lot.into(),
            start_time:    create.start_time,
            end_time:      create.end_time,
            base_price:    create.base_price,
            reserve_price: create.reserve_price,
        }
    }
}

impl Auction {
    pub fn to_api_auction(&self, now: OffsetDateTime) -> api_types::Auction {
        api_types::Auction {
            id:              self.id,
            batch_id:        self.batch_id,
            lot:             self.lot.into(),
            start_time:      self.start_time,
            end_time:        self.end_time,
            base_price:      self.base_price,
            reserve_price:   self.reserve_price,
            status:          self.derive_status(now).into(),
            winner:          self.winner.clone().map(Into::into),
            conclusion_time: self.conclusion_time,
        }
    }
}

impl From<AuctionSummary> for api_types::AuctionSummary {
    fn from(summary: AuctionSummary) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            auction:             summary.auction.to_api_auction(now),
            highest_active_bid:  summary.highest_active_bid.map(|bid| bid.amount),
            active_bid_count:    summary.active_bid_count as u32,
            time_remaining_secs: summary
                .time_remaining
                .map(|remaining| remaining.whole_seconds().max(0) as u64),
        }
    }
}

impl From<Resolution> for api_types::ResolutionOutcome {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Resolved { winner, plan } => api_types::ResolutionOutcome::Resolved {
                winner: winner.map(Into::into),
                plan:   plan.into(),
            },
            Resolution::NoEligibleWinner {
                highest,
                reserve_price,
            } => api_types::ResolutionOutcome::NoEligibleWinner {
                highest,
                reserve_price,
            },
            Resolution::AlreadyResolved { winner } => api_types::ResolutionOutcome::AlreadyResolved {
                winner: winner.map(Into::into),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::Duration,
    };

    fn window() -> (OffsetDateTime, OffsetDateTime) {
        let start = OffsetDateTime::UNIX_EPOCH + Duration::hours(100);
        (start, start + Duration::hours(24))
    }

    #[test]
    fn status_is_pending_before_start() {
        let (start, end) = window();
        assert_eq!(
            derive_status(start - Duration::seconds(1), start, end, false),
            AuctionStatus::Pending
        );
    }

    #[test]
    fn status_is_active_from_start_inclusive() {
        let (start, end) = window();
        assert_eq!(derive_status(start, start, end, false), AuctionStatus::Active);
        assert_eq!(
            derive_status(end - Duration::seconds(1), start, end, false),
            AuctionStatus::Active
        );
    }

    #[test]
    fn status_is_ended_from_end_inclusive() {
        let (start, end) = window();
        assert_eq!(derive_status(end, start, end, false), AuctionStatus::Ended);
        assert_eq!(
            derive_status(end + Duration::days(365), start, end, false),
            AuctionStatus::Ended
        );
    }

    #[test]
    fn cancelled_overrides_the_clock() {
        let (start, end) = window();
        for now in [
            start - Duration::hours(1),
            start,
            end - Duration::seconds(1),
            end + Duration::hours(1),
        ] {
            assert_eq!(
                derive_status(now, start, end, true),
                AuctionStatus::Cancelled
            );
        }
    }

    #[test]
    fn status_never_regresses_as_time_advances() {
        let (start, end) = window();
        let mut last = derive_status(start - Duration::hours(2), start, end, false);
        let mut now = start - Duration::hours(2);
        while now < end + Duration::hours(2) {
            let status = derive_status(now, start, end, false);
            let rank = |s: AuctionStatus| match s {
                AuctionStatus::Pending => 0,
                AuctionStatus::Active => 1,
                AuctionStatus::Ended => 2,
                AuctionStatus::Cancelled => 3,
            };
            assert!(rank(status) >= rank(last));
            last = status;
            now += Duration::minutes(13);
        }
    }

    #[test]
    fn time_remaining_only_while_active() {
        let (start, end) = window();
        let auction = Auction::new(
            AuctionCreate {
                batch_id:      Uuid::new_v4(),
                lot:           AuctionLot::WholeBatch,
                start_time:    start,
                end_time:      end,
                base_price:    100,
                reserve_price: None,
            },
            start - Duration::hours(1),
        );
        assert_eq!(auction.time_remaining(start - Duration::hours(1)), None);
        assert_eq!(
            auction.time_remaining(start + Duration::hours(1)),
            Some(Duration::hours(23))
        );
        assert_eq!(auction.time_remaining(end), None);
    }
}
