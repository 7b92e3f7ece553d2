use {
    super::{
        verification::VerifyAuctionInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        batch::{
            entities::BatchStatus,
            service::update_batch_status::UpdateBatchStatusInput,
        },
    },
    time::OffsetDateTime,
};

pub struct AddAuctionInput {
    pub auction_create: entities::AuctionCreate,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id, batch_id))]
    pub async fn add_auction(&self, input: AddAuctionInput) -> Result<entities::Auction, RestError> {
        tracing::Span::current().record("batch_id", input.auction_create.batch_id.to_string());
        let batch = self
            .verify_auction(VerifyAuctionInput {
                auction_create: input.auction_create.clone(),
            })
            .await?;

        let auction = self
            .repo
            .add_auction(entities::Auction::new(
                input.auction_create,
                OffsetDateTime::now_utc(),
            ))
            .await?;
        tracing::Span::current().record("auction_id", auction.id.to_string());

        let store = self.get_store();
        store
            .batch_service
            .update_batch_status(UpdateBatchStatusInput {
                batch_id: batch.id,
                status:   BatchStatus::AuctionInProgress,
            })
            .await?;
        Ok(auction)
    }
}
