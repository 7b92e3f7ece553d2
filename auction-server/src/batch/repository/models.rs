#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::db::DB,
    },
    axum::async_trait,
    sqlx::{
        types::Json,
        FromRow,
    },
    std::fmt::Debug,
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
    uuid::Uuid,
};

#[derive(Clone, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "waste_category", rename_all = "snake_case")]
pub enum WasteCategory {
    Electronic,
    Paper,
    Plastic,
    Metal,
    Mixed,
}

#[derive(Clone, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "batch_status", rename_all = "snake_case")]
pub enum BatchStatus {
    Draft,
    Published,
    AuctionInProgress,
    AuctionEnded,
    Allocated,
}

impl From<entities::WasteCategory> for WasteCategory {
    fn from(category: entities::WasteCategory) -> Self {
        match category {
            entities::WasteCategory::Electronic => WasteCategory::Electronic,
            entities::WasteCategory::Paper => WasteCategory::Paper,
            entities::WasteCategory::Plastic => WasteCategory::Plastic,
            entities::WasteCategory::Metal => WasteCategory::Metal,
            entities::WasteCategory::Mixed => WasteCategory::Mixed,
        }
    }
}

impl From<WasteCategory> for entities::WasteCategory {
    fn from(category: WasteCategory) -> Self {
        match category {
            WasteCategory::Electronic => entities::WasteCategory::Electronic,
            WasteCategory::Paper => entities::WasteCategory::Paper,
            WasteCategory::Plastic => entities::WasteCategory::Plastic,
            WasteCategory::Metal => entities::WasteCategory::Metal,
            WasteCategory::Mixed => entities::WasteCategory::Mixed,
        }
    }
}

impl From<entities::BatchStatus> for BatchStatus {
    fn from(status: entities::BatchStatus) -> Self {
        match status {
            entities::BatchStatus::Draft => BatchStatus::Draft,
            entities::BatchStatus::Published => BatchStatus::Published,
            entities::BatchStatus::AuctionInProgress => BatchStatus::AuctionInProgress,
            entities::BatchStatus::AuctionEnded => BatchStatus::AuctionEnded,
            entities::BatchStatus::Allocated => BatchStatus::Allocated,
        }
    }
}

impl From<BatchStatus> for entities::BatchStatus {
    fn from(status: BatchStatus) -> Self {
        match status {
            BatchStatus::Draft => entities::BatchStatus::Draft,
            BatchStatus::Published => entities::BatchStatus::Published,
            BatchStatus::AuctionInProgress => entities::BatchStatus::AuctionInProgress,
            BatchStatus::AuctionEnded => entities::BatchStatus::AuctionEnded,
            BatchStatus::Allocated => entities::BatchStatus::Allocated,
        }
    }
}

#[derive(Clone, Debug, FromRow)]
pub struct Batch {
    pub id:                  Uuid,
    pub batch_number:        String,
    pub title:               String,
    pub description:         String,
    pub category:            WasteCategory,
    pub composition:         Json<Vec<entities::CompositionItem>>,
    pub estimated_weight_kg: Option<f64>,
    pub storage_location:    Option<String>,
    pub status:              BatchStatus,
    pub creator:             Uuid,
    pub deleted:             bool,
    pub creation_time:       PrimitiveDateTime,
}

impl Batch {
    pub fn new(
        create: &entities::BatchCreate,
        status: entities::BatchStatus,
        creation_time: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            batch_number: create.batch_number.clone(),
            title: create.title.clone(),
            description: create.description.clone(),
            category: create.category.into(),
            composition: Json(create.composition.clone()),
            estimated_weight_kg: create.estimated_weight_kg,
            storage_location: create.storage_location.clone(),
            status: status.into(),
            creator: create.creator,
            deleted: false,
            creation_time: PrimitiveDateTime::new(creation_time.date(), creation_time.time()),
        }
    }

    pub fn get_batch_entity(&self) -> entities::Batch {
        entities::Batch {
            id:                  self.id,
            batch_number:        self.batch_number.clone(),
            title:               self.title.clone(),
            description:         self.description.clone(),
            category:            self.category.clone().into(),
            composition:         self.composition.0.clone(),
            estimated_weight_kg: self.estimated_weight_kg,
            storage_location:    self.storage_location.clone(),
            status:              self.status.clone().into(),
            creator:             self.creator,
            deleted:             self.deleted,
            creation_time:       self.creation_time.assume_offset(UtcOffset::UTC),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_batch(&self, batch: &Batch) -> Result<(), RestError>;
    async fn get_batch(&self, batch_id: entities::BatchId) -> Result<Option<Batch>, RestError>;
    async fn get_batch_by_number(&self, batch_number: &str) -> Result<Option<Batch>, RestError>;
    async fn get_batches(&self) -> Result<Vec<Batch>, RestError>;
    async fn update_batch_status(
        &self,
        batch_id: entities::BatchId,
        status: BatchStatus,
    ) -> Result<(), RestError>;
    async fn delete_batch(&self, batch_id: entities::BatchId) -> Result<(), RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(skip_all, fields(batch_id))]
    async fn add_batch(&self, batch: &Batch) -> Result<(), RestError> {
        tracing::Span::current().record("batch_id", batch.id.to_string());
        sqlx::query(
            "INSERT INTO batch (id, batch_number, title, description, category, composition, estimated_weight_kg, storage_location, status, creator, deleted, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(batch.id)
        .bind(&batch.batch_number)
        .bind(&batch.title)
        .bind(&batch.description)
        .bind(batch.category.clone())
        .bind(batch.composition.clone())
        .bind(batch.estimated_weight_kg)
        .bind(&batch.storage_location)
        .bind(batch.status.clone())
        .bind(batch.creator)
        .bind(batch.deleted)
        .bind(batch.creation_time)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to insert batch");
            RestError::TemporarilyUnavailable
        })?;
        Ok(())
    }

    #[instrument(skip_all, fields(batch_id))]
    async fn get_batch(&self, batch_id: entities::BatchId) -> Result<Option<Batch>, RestError> {
        tracing::Span::current().record("batch_id", batch_id.to_string());
        sqlx::query_as("SELECT * FROM batch WHERE id = $1")
            .bind(batch_id)
            .fetch_optional(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to get batch");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(skip_all)]
    async fn get_batch_by_number(&self, batch_number: &str) -> Result<Option<Batch>, RestError> {
        sqlx::query_as("SELECT * FROM batch WHERE batch_number = $1 AND deleted = false")
            .bind(batch_number)
            .fetch_optional(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to get batch by number");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(skip_all)]
    async fn get_batches(&self) -> Result<Vec<Batch>, RestError> {
        sqlx::query_as("SELECT * FROM batch WHERE deleted = false ORDER BY creation_time DESC")
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to list batches");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(skip_all, fields(batch_id, status))]
    async fn update_batch_status(
        &self,
        batch_id: entities::BatchId,
        status: BatchStatus,
    ) -> Result<(), RestError> {
        tracing::Span::current().record("batch_id", batch_id.to_string());
        tracing::Span::current().record("status", format!("{:?}", status));
        sqlx::query("UPDATE batch SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(batch_id)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to update batch status");
                RestError::TemporarilyUnavailable
            })?;
        Ok(())
    }

    #[instrument(skip_all, fields(batch_id))]
    async fn delete_batch(&self, batch_id: entities::BatchId) -> Result<(), RestError> {
        tracing::Span::current().record("batch_id", batch_id.to_string());
        sqlx::query("UPDATE batch SET deleted = true WHERE id = $1")
            .bind(batch_id)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to delete batch");
                RestError::TemporarilyUnavailable
            })?;
        Ok(())
    }
}
