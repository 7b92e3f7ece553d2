use {
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

pub type BatchId = Uuid;

/// A waste medium inside a batch, the unit of lot-level auctioning.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Medium {
    Paper,
    Electronic,
    Other,
}

/// The coarse classification tag of a whole batch.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WasteCategory {
    Electronic,
    Paper,
    Plastic,
    Metal,
    Mixed,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BatchStatus {
    Draft,
    Published,
    AuctionInProgress,
    AuctionEnded,
    Allocated,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct CompositionItem {
    /// The medium this line of the breakdown belongs to.
    pub medium:   Medium,
    /// Free-form sub-type within the medium.
    #[schema(example = "mixed office paper")]
    pub sub_type: String,
    /// Number of units (bags, pallets, crates) of this sub-type.
    #[schema(example = 12)]
    pub quantity: u32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BatchCreate {
    /// Stable human-referenceable batch number, unique across the platform.
    #[schema(example = "WB-2026-0142")]
    pub batch_number:        String,
    #[schema(example = "Q3 shredding tail material")]
    pub title:               String,
    pub description:         String,
    pub category:            WasteCategory,
    /// Structured breakdown by medium sub-type. Must not be empty.
    pub composition:         Vec<CompositionItem>,
    #[schema(example = 820.5)]
    pub estimated_weight_kg: Option<f64>,
    #[schema(example = "warehouse 3, bay A")]
    pub storage_location:    Option<String>,
    /// The administrative actor creating the batch.
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub creator:             Uuid,
    /// Publish the batch immediately instead of leaving it in draft.
    #[serde(default)]
    pub publish:             bool,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Batch {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:                  BatchId,
    #[schema(example = "WB-2026-0142")]
    pub batch_number:        String,
    pub title:               String,
    pub description:         String,
    pub category:            WasteCategory,
    pub composition:         Vec<CompositionItem>,
    pub estimated_weight_kg: Option<f64>,
    pub storage_location:    Option<String>,
    pub status:              BatchStatus,
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub creator:             Uuid,
    /// The time the batch was registered formatted in rfc3339.
    #[schema(example = "2026-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time:       OffsetDateTime,
}
