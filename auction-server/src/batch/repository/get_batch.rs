use {
    super::Repository,
    crate::{
        api::RestError,
        batch::entities,
    },
};

impl Repository {
    pub async fn get_batch(
        &self,
        batch_id: entities::BatchId,
    ) -> Result<Option<entities::Batch>, RestError> {
        if let Some(batch) = self.in_memory_store.batches.read().await.get(&batch_id) {
            return Ok(Some(batch.clone()));
        }

        match self.db.get_batch(batch_id).await? {
            Some(model) => {
                let batch = model.get_batch_entity();
                self.in_memory_store
                    .batches
                    .write()
                    .await
                    .insert(batch.id, batch.clone());
                Ok(Some(batch))
            }
            None => Ok(None),
        }
    }
}
