use {
    crate::{
        batch::entities::Medium,
        kernel::entities::{
            Amount,
            BidderId,
        },
    },
    salvage_auction_api_types::allocation as api_types,
    time::OffsetDateTime,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Itemized,
    Bundled,
}

/// A bidder's standing offer considered by the optimizer. At most one per
/// bidder per lot, since a bidder has at most one active bid in an auction.
#[derive(Clone, Debug, PartialEq)]
pub struct BestBid {
    pub bidder:   BidderId,
    pub amount:   Amount,
    pub bid_time: OffsetDateTime,
}

/// The standing offers on one medium lot of a batch.
#[derive(Clone, Debug)]
pub struct CategoryBids {
    pub medium: Medium,
    pub bids:   Vec<BestBid>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryAward {
    pub medium: Medium,
    pub bidder: BidderId,
    pub amount: Amount,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemizedPlan {
    pub awards:       Vec<CategoryAward>,
    pub gross:        Amount,
    pub vendor_count: u32,
    pub net:          i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BundledPlan {
    pub bidder:   BidderId,
    pub total:    Amount,
    pub net:      i64,
    pub bid_time: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AllocationPlan {
    pub selected:          Option<Strategy>,
    pub itemized:          Option<ItemizedPlan>,
    pub bundled:           Option<BundledPlan>,
    pub vendor_admin_cost: Amount,
}

impl From<Strategy> for api_types::Strategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Itemized => api_types::Strategy::Itemized,
            Strategy::Bundled => api_types::Strategy::Bundled,
        }
    }
}

impl From<CategoryAward> for api_types::CategoryAward {
    fn from(award: CategoryAward) -> Self {
        Self {
            medium: award.medium.into(),
            bidder: award.bidder,
            amount: award.amount,
        }
    }
}

impl From<ItemizedPlan> for api_types::ItemizedPlan {
    fn from(plan: ItemizedPlan) -> Self {
        Self {
            awards:       plan.awards.into_iter().map(Into::into).collect(),
            gross:        plan.gross,
            vendor_count: plan.vendor_count,
            net:          plan.net,
        }
    }
}

impl From<BundledPlan> for api_types::BundledPlan {
    fn from(plan: BundledPlan) -> Self {
        Self {
            bidder: plan.bidder,
            total:  plan.total,
            net:    plan.net,
        }
    }
}

impl From<AllocationPlan> for api_types::AllocationPlan {
    fn from(plan: AllocationPlan) -> Self {
        Self {
            selected:          plan.selected.map(Into::into),
            itemized:          plan.itemized.map(Into::into),
            bundled:           plan.bundled.map(Into::into),
            vendor_admin_cost: plan.vendor_admin_cost,
        }
    }
}
