use {
    super::Repository,
    crate::{
        api::RestError,
        batch::entities,
    },
};

impl Repository {
    pub async fn delete_batch(&self, batch_id: entities::BatchId) -> Result<(), RestError> {
        self.db.delete_batch(batch_id).await?;
        if let Some(batch) = self.in_memory_store.batches.write().await.get_mut(&batch_id) {
            batch.deleted = true;
        }
        Ok(())
    }
}
