use {
    crate::kernel::entities::AdminId,
    salvage_auction_api_types::batch as api_types,
    serde::{
        Deserialize,
        Serialize,
    },
    strum::Display,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type BatchId = Uuid;

/// A waste medium inside a batch. Lots are auctioned per medium and the
/// allocation decision is taken over the media present in the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Medium {
    Paper,
    Electronic,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WasteCategory {
    Electronic,
    Paper,
    Plastic,
    Metal,
    Mixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BatchStatus {
    Draft,
    Published,
    AuctionInProgress,
    AuctionEnded,
    Allocated,
}

impl BatchStatus {
    /// Guard for the advisory lifecycle. `Allocated` is terminal; everything
    /// else moves forward with the auction lifecycle, or back to `Published`
    /// when every auction of the batch was cancelled.
    pub fn can_transition_to(&self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::Draft, BatchStatus::Published)
                | (BatchStatus::Published, BatchStatus::AuctionInProgress)
                | (BatchStatus::AuctionInProgress, BatchStatus::AuctionEnded)
                | (BatchStatus::AuctionInProgress, BatchStatus::Allocated)
                | (BatchStatus::AuctionInProgress, BatchStatus::Published)
                | (BatchStatus::AuctionEnded, BatchStatus::Allocated)
                | (BatchStatus::AuctionEnded, BatchStatus::AuctionInProgress)
                | (BatchStatus::AuctionEnded, BatchStatus::Published)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositionItem {
    pub medium:   Medium,
    pub sub_type: String,
    pub quantity: u32,
}

#[derive(Clone, Debug)]
pub struct Batch {
    pub id:                  BatchId,
    pub batch_number:        String,
    pub title:               String,
    pub description:         String,
    pub category:            WasteCategory,
    pub composition:         Vec<CompositionItem>,
    pub estimated_weight_kg: Option<f64>,
    pub storage_location:    Option<String>,
    pub status:              BatchStatus,
    pub creator:             AdminId,
    pub deleted:             bool,
    pub creation_time:       OffsetDateTime,
}

impl Batch {
    /// The distinct media of the composition, in first-appearance order.
    pub fn media(&self) -> Vec<Medium> {
        let mut media = Vec::new();
        for item in &self.composition {
            if !media.contains(&item.medium) {
                media.push(item.medium);
            }
        }
        media
    }

    pub fn has_medium(&self, medium: Medium) -> bool {
        self.composition.iter().any(|item| item.medium == medium)
    }
}

#[derive(Clone, Debug)]
pub struct BatchCreate {
    pub batch_number:        String,
    pub title:               String,
    pub description:         String,
    pub category:            WasteCategory,
    pub composition:         Vec<CompositionItem>,
    pub estimated_weight_kg: Option<f64>,
    pub storage_location:    Option<String>,
    pub creator:             AdminId,
    pub publish:             bool,
}

impl From<api_types::Medium> for Medium {
    fn from(medium: api_types::Medium) -> Self {
        match medium {
            api_types::Medium::Paper => Medium::Paper,
            api_types::Medium::Electronic => Medium::Electronic,
            api_types::Medium::Other => Medium::Other,
        }
    }
}

impl From<Medium> for api_types::Medium {
    fn from(medium: Medium) -> Self {
        match medium {
            Medium::Paper => api_types::Medium::Paper,
            Medium::Electronic => api_types::Medium::Electronic,
            Medium::Other => api_types::Medium::Other,
        }
    }
}

impl From<api_types::WasteCategory> for WasteCategory {
    fn from(category: api_types::WasteCategory) -> Self {
        match category {
            api_types::WasteCategory::Electronic => WasteCategory::Electronic,
            api_types::WasteCategory::Paper => WasteCategory::Paper,
            api_types::WasteCategory::Plastic => WasteCategory::Plastic,
            api_types::WasteCategory::Metal => WasteCategory::Metal,
            api_types::WasteCategory::Mixed => WasteCategory::Mixed,
        }
    }
}

impl From<WasteCategory> for api_types::WasteCategory {
    fn from(category: WasteCategory) -> Self {
        match category {
            WasteCategory::Electronic => api_types::WasteCategory::Electronic,
            WasteCategory::Paper => api_types::WasteCategory::Paper,
            WasteCategory::Plastic => api_types::WasteCategory::Plastic,
            WasteCategory::Metal => api_types::WasteCategory::Metal,
            WasteCategory::Mixed => api_types::WasteCategory::Mixed,
        }
    }
}

impl From<BatchStatus> for api_types::BatchStatus {
    fn from(status: BatchStatus) -> Self {
        match status {
            BatchStatus::Draft => api_types::BatchStatus::Draft,
            BatchStatus::Published => api_types::BatchStatus::Published,
            BatchStatus::AuctionInProgress => api_types::BatchStatus::AuctionInProgress,
            BatchStatus::AuctionEnded => api_types::BatchStatus::AuctionEnded,
            BatchStatus::Allocated => api_types::BatchStatus::Allocated,
        }
    }
}

impl From<api_types::CompositionItem> for CompositionItem {
    fn from(item: api_types::CompositionItem) -> Self {
        Self {
            medium:   item.medium.into(),
            sub_type: item.sub_type,
            quantity: item.quantity,
        }
    }
}

impl From<CompositionItem> for api_types::CompositionItem {
    fn from(item: CompositionItem) -> Self {
        Self {
            medium:   item.medium.into(),
            sub_type: item.sub_type,
            quantity: item.quantity,
        }
    }
}

impl From<api_types::BatchCreate> for BatchCreate {
    fn from(create: api_types::BatchCreate) -> Self {
        Self {
            batch_number:        create.batch_number,
            title:               create.title,
            description:         create.description,
            category:            create.category.into(),
            composition:         create.composition.into_iter().map(Into::into).collect(),
            estimated_weight_kg: create.estimated_weight_kg,
            storage_location:    create.storage_location,
            creator:             create.creator,
            publish:             create.publish,
        }
    }
}

impl From<Batch> for api_types::Batch {
    fn from(batch: Batch) -> Self {
        Self {
            id:                  batch.id,
            batch_number:        batch.batch_number,
            title:               batch.title,
            description:         batch.description,
            category:            batch.category.into(),
            composition:         batch.composition.into_iter().map(Into::into).collect(),
            estimated_weight_kg: batch.estimated_weight_kg,
            storage_location:    batch.storage_location,
            status:              batch.status.into(),
            creator:             batch.creator,
            creation_time:       batch.creation_time,
        }
    }
}
