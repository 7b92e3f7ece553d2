use {
    super::{
        get_batch::GetBatchInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::{
            entities::AuctionStatus,
            service::get_auctions_by_batch::GetAuctionsByBatchInput,
        },
        batch::entities,
    },
    time::OffsetDateTime,
};

pub struct DeleteBatchInput {
    pub batch_id: entities::BatchId,
}

impl Service {
    /// Soft deletion. Allowed at any lifecycle stage, including `Allocated`,
    /// but never while an auction on the batch is still open.
    #[tracing::instrument(skip_all, fields(batch_id))]
    pub async fn delete_batch(&self, input: DeleteBatchInput) -> Result<(), RestError> {
        tracing::Span::current().record("batch_id", input.batch_id.to_string());
        let batch = self
            .get_batch(GetBatchInput {
                batch_id: input.batch_id,
            })
            .await?;

        let store = self.get_store();
        let auctions = store
            .auction_service
            .get_auctions_by_batch(GetAuctionsByBatchInput { batch_id: batch.id })
            .await?;
        let now = OffsetDateTime::now_utc();
        let has_live_auction = auctions.iter().any(|auction| {
            !auction.is_concluded()
                && matches!(
                    auction.derive_status(now),
                    AuctionStatus::Pending | AuctionStatus::Active
                )
        });
        if has_live_auction {
            return Err(RestError::BadParameters(
                "batch has an open auction and cannot be deleted".to_string(),
            ));
        }

        self.repo.delete_batch(batch.id).await
    }
}
