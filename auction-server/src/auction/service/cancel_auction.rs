use {
    super::{
        get_auction::GetAuctionInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        batch::{
            entities::BatchStatus,
            service::{
                get_batch::GetBatchInput,
                update_batch_status::UpdateBatchStatusInput,
            },
        },
        bid::service::cancel_auction_bids::CancelAuctionBidsInput,
    },
    time::OffsetDateTime,
};

pub struct CancelAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Administrative terminal override, allowed only while the auction is
    /// pending or active. Takes the admission lock exclusively, so a bid
    /// submitted concurrently with the cancel is rejected rather than
    /// accepted after the fact.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn cancel_auction(
        &self,
        input: CancelAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        tracing::Span::current().record("auction_id", input.auction_id.to_string());
        let auction = self
            .get_auction(GetAuctionInput {
                auction_id: input.auction_id,
            })
            .await?;
        let lock = self.repo.get_or_create_auction_lock(auction.batch_id).await;
        let _guard = lock.lock().await;

        let auction = self
            .get_auction(GetAuctionInput {
                auction_id: input.auction_id,
            })
            .await?;
        match auction.derive_status(OffsetDateTime::now_utc()) {
            entities::AuctionStatus::Cancelled => return Ok(auction),
            entities::AuctionStatus::Ended => {
                return Err(RestError::BadParameters(
                    "auction has already ended and can no longer be cancelled".to_string(),
                ))
            }
            entities::AuctionStatus::Pending | entities::AuctionStatus::Active => {}
        }

        let store = self.get_store();
        let admission = store.bid_service.get_admission_lock(auction.id).await;
        let _admission_guard = admission.write().await;

        if !self.repo.cancel_auction(auction.id).await? {
            return Err(RestError::BadParameters(
                "auction has already ended and can no longer be cancelled".to_string(),
            ));
        }
        store
            .bid_service
            .cancel_auction_bids(CancelAuctionBidsInput {
                auction_id: auction.id,
            })
            .await?;

        // With no other live auction the advisory batch status falls back to
        // published, so the material can be offered again.
        let siblings = self.repo.get_auctions_by_batch(auction.batch_id).await?;
        let all_cancelled = siblings
            .iter()
            .filter(|sibling| sibling.id != auction.id)
            .all(|sibling| sibling.cancelled);
        if all_cancelled {
            let batch = store
                .batch_service
                .get_batch(GetBatchInput {
                    batch_id: auction.batch_id,
                })
                .await?;
            if batch.status == BatchStatus::AuctionInProgress {
                store
                    .batch_service
                    .update_batch_status(UpdateBatchStatusInput {
                        batch_id: batch.id,
                        status:   BatchStatus::Published,
                    })
                    .await?;
            }
        }

        self.get_auction(GetAuctionInput {
            auction_id: input.auction_id,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::{
                entities::{
                    AuctionCreate,
                    AuctionLot,
                },
                service::add_auction::AddAuctionInput,
            },
            batch::{
                entities as batch_entities,
                service::add_batch::AddBatchInput,
            },
            state::{
                test_utils::Mocks,
                StoreNew,
            },
        },
        std::sync::Arc,
        time::Duration,
        uuid::Uuid,
    };

    async fn seeded_auction(
        store: &Arc<StoreNew>,
        start_offset: Duration,
        end_offset: Duration,
    ) -> entities::Auction {
        let now = OffsetDateTime::now_utc();
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_entities::BatchCreate {
                    batch_number:        format!("WB-{}", Uuid::new_v4()),
                    title:               "tail material".to_string(),
                    description:         String::new(),
                    category:            batch_entities::WasteCategory::Paper,
                    composition:         vec![batch_entities::CompositionItem {
                        medium:   batch_entities::Medium::Paper,
                        sub_type: "misc".to_string(),
                        quantity: 1,
                    }],
                    estimated_weight_kg: None,
                    storage_location:    None,
                    creator:             Uuid::new_v4(),
                    publish:             true,
                },
            })
            .await
            .unwrap();
        store
            .auction_service
            .add_auction(AddAuctionInput {
                auction_create: AuctionCreate {
                    batch_id:      batch.id,
                    lot:           AuctionLot::WholeBatch,
                    start_time:    now + start_offset,
                    end_time:      now + end_offset,
                    base_price:    100,
                    reserve_price: None,
                },
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn cancels_a_pending_auction_and_reverts_the_batch() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(1), Duration::hours(2)).await;

        let cancelled = store
            .auction_service
            .cancel_auction(CancelAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert!(cancelled.cancelled);

        let batch = store
            .batch_service
            .get_batch(GetBatchInput {
                batch_id: auction.batch_id,
            })
            .await
            .unwrap();
        assert_eq!(batch.status, BatchStatus::Published);
    }

    #[tokio::test]
    async fn cancelling_twice_is_a_no_op() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(2)).await;

        store
            .auction_service
            .cancel_auction(CancelAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        let second = store
            .auction_service
            .cancel_auction(CancelAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert!(second.cancelled);
    }

    #[tokio::test]
    async fn an_ended_auction_cannot_be_cancelled() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-2), Duration::hours(-1)).await;

        let result = store
            .auction_service
            .cancel_auction(CancelAuctionInput {
                auction_id: auction.id,
            })
            .await;
        assert!(matches!(result, Err(RestError::BadParameters(_))));
    }
}
