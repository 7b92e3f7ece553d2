use {
    super::Service,
    crate::{
        api::RestError,
        batch::entities,
    },
};

pub struct GetBatchInput {
    pub batch_id: entities::BatchId,
}

impl Service {
    pub async fn get_batch(&self, input: GetBatchInput) -> Result<entities::Batch, RestError> {
        match self.repo.get_batch(input.batch_id).await? {
            Some(batch) if !batch.deleted => Ok(batch),
            _ => Err(RestError::BatchNotFound),
        }
    }
}
