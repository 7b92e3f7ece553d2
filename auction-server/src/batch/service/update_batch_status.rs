use {
    super::{
        get_batch::GetBatchInput,
        Service,
    },
    crate::{
        api::RestError,
        batch::entities,
    },
};

pub struct UpdateBatchStatusInput {
    pub batch_id: entities::BatchId,
    pub status:   entities::BatchStatus,
}

impl Service {
    /// Advances the advisory batch lifecycle in response to auction events.
    /// The status never decides whether bidding is open; the clock does.
    #[tracing::instrument(skip_all, fields(batch_id, status))]
    pub async fn update_batch_status(
        &self,
        input: UpdateBatchStatusInput,
    ) -> Result<entities::Batch, RestError> {
        tracing::Span::current().record("batch_id", input.batch_id.to_string());
        tracing::Span::current().record("status", input.status.to_string());

        let mut batch = self
            .get_batch(GetBatchInput {
                batch_id: input.batch_id,
            })
            .await?;
        if batch.status == input.status {
            return Ok(batch);
        }
        if !batch.status.can_transition_to(input.status) {
            return Err(RestError::BadParameters(format!(
                "cannot move batch from {} to {}",
                batch.status, input.status
            )));
        }

        self.repo
            .update_batch_status(input.batch_id, input.status)
            .await?;
        batch.status = input.status;
        Ok(batch)
    }
}
