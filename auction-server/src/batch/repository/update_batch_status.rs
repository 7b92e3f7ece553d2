use {
    super::Repository,
    crate::{
        api::RestError,
        batch::entities,
    },
};

impl Repository {
    pub async fn update_batch_status(
        &self,
        batch_id: entities::BatchId,
        status: entities::BatchStatus,
    ) -> Result<(), RestError> {
        self.db.update_batch_status(batch_id, status.into()).await?;
        if let Some(batch) = self.in_memory_store.batches.write().await.get_mut(&batch_id) {
            batch.status = status;
        }
        Ok(())
    }
}
