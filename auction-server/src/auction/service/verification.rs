use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        batch::{
            entities::{
                Batch,
                BatchStatus,
            },
            service::get_batch::GetBatchInput,
        },
    },
};

pub struct VerifyAuctionInput {
    pub auction_create: entities::AuctionCreate,
}

impl Service {
    /// Validates an auction before anything is persisted: a strictly positive
    /// window, a positive base price, a batch that is open for auctioning and
    /// actually contains the lot, and no competing open auction on the lot.
    pub(super) async fn verify_auction(&self, input: VerifyAuctionInput) -> Result<Batch, RestError> {
        let create = &input.auction_create;
        if create.end_time <= create.start_time {
            return Err(RestError::BadParameters(
                "auction window must have a strictly positive duration".to_string(),
            ));
        }
        if create.base_price == 0 {
            return Err(RestError::BadParameters(
                "base price must be positive".to_string(),
            ));
        }

        let store = self.get_store();
        let batch = store
            .batch_service
            .get_batch(GetBatchInput {
                batch_id: create.batch_id,
            })
            .await?;
        match batch.status {
            BatchStatus::Draft => {
                return Err(RestError::BadParameters(
                    "batch is not published".to_string(),
                ))
            }
            BatchStatus::Allocated => {
                return Err(RestError::BadParameters(
                    "batch has already been allocated".to_string(),
                ))
            }
            BatchStatus::Published
            | BatchStatus::AuctionInProgress
            | BatchStatus::AuctionEnded => {}
        }

        if let entities::AuctionLot::Medium { medium } = create.lot {
            if !batch.has_medium(medium) {
                return Err(RestError::BadParameters(format!(
                    "batch has no {} material",
                    medium
                )));
            }
        }

        let auctions = self.repo.get_auctions_by_batch(batch.id).await?;
        if auctions
            .iter()
            .any(|auction| auction.lot == create.lot && !auction.cancelled && !auction.is_concluded())
        {
            return Err(RestError::BadParameters(
                "an auction for this lot is already open".to_string(),
            ));
        }

        Ok(batch)
    }
}
