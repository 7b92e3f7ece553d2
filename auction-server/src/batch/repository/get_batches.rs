use {
    super::Repository,
    crate::{
        api::RestError,
        batch::entities,
    },
};

impl Repository {
    pub async fn get_batches(&self) -> Result<Vec<entities::Batch>, RestError> {
        let batches: Vec<entities::Batch> = self
            .db
            .get_batches()
            .await?
            .iter()
            .map(|model| model.get_batch_entity())
            .collect();

        let mut write_guard = self.in_memory_store.batches.write().await;
        for batch in &batches {
            // The in-memory copy may carry a fresher advisory status.
            write_guard.entry(batch.id).or_insert_with(|| batch.clone());
        }
        drop(write_guard);

        let read_guard = self.in_memory_store.batches.read().await;
        Ok(batches
            .into_iter()
            .map(|batch| read_guard.get(&batch.id).cloned().unwrap_or(batch))
            .collect())
    }
}
