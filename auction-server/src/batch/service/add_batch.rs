use {
    super::Service,
    crate::{
        api::RestError,
        batch::entities,
    },
};

pub struct AddBatchInput {
    pub batch_create: entities::BatchCreate,
}

impl Service {
    /// Registers a batch described by the catalog manager.
    #[tracing::instrument(skip_all, fields(batch_id, batch_number))]
    pub async fn add_batch(&self, input: AddBatchInput) -> Result<entities::Batch, RestError> {
        let create = input.batch_create;
        tracing::Span::current().record("batch_number", &create.batch_number);

        if create.batch_number.trim().is_empty() {
            return Err(RestError::BadParameters(
                "batch number must not be empty".to_string(),
            ));
        }
        if create.title.trim().is_empty() {
            return Err(RestError::BadParameters(
                "title must not be empty".to_string(),
            ));
        }
        if create.composition.is_empty() {
            return Err(RestError::BadParameters(
                "composition must contain at least one item".to_string(),
            ));
        }
        if create.composition.iter().any(|item| item.quantity == 0) {
            return Err(RestError::BadParameters(
                "composition quantities must be positive".to_string(),
            ));
        }
        if self
            .repo
            .get_batch_by_number(&create.batch_number)
            .await?
            .is_some()
        {
            return Err(RestError::BadParameters(format!(
                "batch number {} is already in use",
                create.batch_number
            )));
        }

        let batch = self.repo.add_batch(create).await?;
        tracing::Span::current().record("batch_id", batch.id.to_string());
        Ok(batch)
    }
}
