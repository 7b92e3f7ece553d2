use {
    super::{
        models,
        Repository,
    },
    crate::{
        api::RestError,
        batch::entities,
    },
    time::OffsetDateTime,
};

impl Repository {
    pub async fn add_batch(
        &self,
        create: entities::BatchCreate,
    ) -> Result<entities::Batch, RestError> {
        let status = if create.publish {
            entities::BatchStatus::Published
        } else {
            entities::BatchStatus::Draft
        };
        let model = models::Batch::new(&create, status, OffsetDateTime::now_utc());
        let batch = model.get_batch_entity();
        self.db.add_batch(&model).await?;

        self.in_memory_store
            .batches
            .write()
            .await
            .insert(batch.id, batch.clone());
        Ok(batch)
    }

    pub async fn get_batch_by_number(
        &self,
        batch_number: &str,
    ) -> Result<Option<entities::Batch>, RestError> {
        let found = self
            .in_memory_store
            .batches
            .read()
            .await
            .values()
            .find(|batch| batch.batch_number == batch_number && !batch.deleted)
            .cloned();
        if found.is_some() {
            return Ok(found);
        }

        match self.db.get_batch_by_number(batch_number).await? {
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
