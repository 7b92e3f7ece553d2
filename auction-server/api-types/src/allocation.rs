use {
    crate::{
        batch::Medium,
        Amount,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::Display,
    utoipa::{
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Each medium lot goes to its own highest bidder.
    Itemized,
    /// The whole batch goes to a single full-coverage bidder.
    Bundled,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct CategoryAward {
    pub medium: Medium,
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bidder: Uuid,
    #[schema(example = 50000)]
    pub amount: Amount,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct ItemizedPlan {
    pub awards:       Vec<CategoryAward>,
    /// Sum of the per-lot winning bids.
    #[schema(example = 130000)]
    pub gross:        Amount,
    /// Number of distinct vendors that would be contracted.
    #[schema(example = 2)]
    pub vendor_count: u32,
    /// Gross minus one administrative cost per distinct vendor; may be negative.
    #[schema(example = 10000)]
    pub net:          i64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct BundledPlan {
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub bidder: Uuid,
    /// The whole-batch bid amount.
    #[schema(example = 125000)]
    pub total:  Amount,
    /// Total minus a single administrative cost; may be negative.
    #[schema(example = 65000)]
    pub net:    i64,
}

/// The net-revenue comparison between the itemized and bundled disposal
/// strategies, and which of the two the engine would pick.
#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct AllocationPlan {
    /// The chosen strategy; absent while no bids have been received.
    pub selected:          Option<Strategy>,
    pub itemized:          Option<ItemizedPlan>,
    pub bundled:           Option<BundledPlan>,
    /// The per-vendor administrative cost used for the comparison, in minor units.
    #[schema(example = 60000)]
    pub vendor_admin_cost: Amount,
}
