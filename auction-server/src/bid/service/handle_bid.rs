use {
    super::{
        verification::VerifyBidInput,
        Service,
    },
    crate::{
        api::RestError,
        bid::entities,
    },
};

pub struct HandleBidInput {
    pub bid_create: entities::BidCreate,
}

impl Service {
    /// Accepts a competing bid. A bidder revising their own standing bid is
    /// superseded atomically (old bid to `Outbid`, new bid inserted); other
    /// bidders' rows are never touched, competitive outbidding only shows up
    /// through the highest-active-bid aggregate.
    #[tracing::instrument(
        skip_all,
        fields(auction_id, bidder_id, bid_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn handle_bid(&self, input: HandleBidInput) -> Result<entities::Bid, RestError> {
        tracing::Span::current().record("auction_id", input.bid_create.auction_id.to_string());
        tracing::Span::current().record("bidder_id", input.bid_create.bidder.to_string());

        let admission = self
            .repo
            .get_or_create_admission_lock(input.bid_create.auction_id)
            .await;
        let _admission_guard = admission.read().await;
        let bid_lock = self
            .repo
            .get_or_create_bid_lock(input.bid_create.auction_id, input.bid_create.bidder)
            .await;
        let _bid_guard = bid_lock.lock().await;

        self.verify_bid(VerifyBidInput {
            bid_create: input.bid_create.clone(),
        })
        .await?;

        let superseded = self
            .repo
            .get_active_bid(input.bid_create.auction_id, input.bid_create.bidder)
            .await?;
        let bid = self
            .repo
            .add_bid(input.bid_create, superseded.map(|previous| previous.id))
            .await?;
        tracing::Span::current().record("bid_id", bid.id.to_string());
        Ok(bid)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::{
                entities::{
                    AuctionLot,
                    AuctionStatus,
                },
                service::add_auction::AddAuctionInput,
            },
            batch::{
                entities as batch_entities,
                service::add_batch::AddBatchInput,
            },
            bid::{
                entities::BidStatus,
                service::{
                    get_bids::GetBidsInput,
                    get_highest_active_bid::GetHighestActiveBidInput,
                },
            },
            kernel::user_directory::MockUserDirectory,
            models::Bidder,
            state::{
                test_utils::Mocks,
                StoreNew,
            },
        },
        crate::auction::entities::AuctionCreate,
        std::sync::Arc,
        time::{
            Duration,
            OffsetDateTime,
        },
        uuid::Uuid,
    };

    fn batch_create(media: &[batch_entities::Medium]) -> batch_entities::BatchCreate {
        batch_entities::BatchCreate {
            batch_number:        format!("WB-{}", Uuid::new_v4()),
            title:               "tail material".to_string(),
            description:         "salvageable leftovers".to_string(),
            category:            batch_entities::WasteCategory::Mixed,
            composition:         media
                .iter()
                .map(|medium| batch_entities::CompositionItem {
                    medium:   *medium,
                    sub_type: "misc".to_string(),
                    quantity: 1,
                })
                .collect(),
            estimated_weight_kg: None,
            storage_location:    None,
            creator:             Uuid::new_v4(),
            publish:             true,
        }
    }

    async fn seeded_auction(
        store: &Arc<StoreNew>,
        start_offset: Duration,
        end_offset: Duration,
        base_price: u64,
    ) -> crate::auction::entities::Auction {
        let now = OffsetDateTime::now_utc();
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[batch_entities::Medium::Paper]),
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
                    base_price,
                    reserve_price: None,
                },
            })
            .await
            .unwrap()
    }

    fn bid_create(
        auction_id: Uuid,
        bidder: Uuid,
        amount: u64,
    ) -> crate::bid::entities::BidCreate {
        crate::bid::entities::BidCreate {
            auction_id,
            bidder,
            amount,
            note: None,
        }
    }

    #[tokio::test]
    async fn accepts_a_bid_on_an_active_auction() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 100).await;

        let bidder = Uuid::new_v4();
        let bid = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, bidder, 250),
            })
            .await
            .unwrap();
        assert_eq!(bid.amount, 250);
        assert_eq!(bid.status, BidStatus::Active);
        assert_eq!(bid.bidder, bidder);
    }

    #[tokio::test]
    async fn rejects_a_bid_before_the_auction_opens() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(1), Duration::hours(2), 100).await;

        let result = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, Uuid::new_v4(), 250),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            RestError::AuctionNotActive {
                status: AuctionStatus::Pending,
            }
        );
    }

    #[tokio::test]
    async fn rejects_a_bid_after_the_auction_closes() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-2), Duration::hours(-1), 100).await;

        let result = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, Uuid::new_v4(), 250),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            RestError::AuctionNotActive {
                status: AuctionStatus::Ended,
            }
        );
    }

    #[tokio::test]
    async fn rejects_a_bid_after_an_administrative_cancel() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 100).await;
        store
            .auction_service
            .cancel_auction(crate::auction::service::cancel_auction::CancelAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();

        let result = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, Uuid::new_v4(), 250),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            RestError::AuctionNotActive {
                status: AuctionStatus::Cancelled,
            }
        );
    }

    #[tokio::test]
    async fn rejects_a_bid_below_the_base_price_with_the_minimum() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 300).await;

        let result = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, Uuid::new_v4(), 299),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::BidTooLow { minimum: 300 });
    }

    #[tokio::test]
    async fn rejects_a_bidder_the_directory_does_not_vouch_for() {
        let mut mocks = Mocks::default();
        let mut user_directory = MockUserDirectory::default();
        user_directory.expect_get_bidder().returning(|id| {
            Ok(Some(Bidder {
                id,
                display_name: "revoked merchant".to_string(),
                approved: false,
            }))
        });
        mocks.user_directory = user_directory;
        let store = StoreNew::new_with_mocks(mocks);
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 100).await;

        let result = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, Uuid::new_v4(), 250),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::BidderNotApproved);
    }

    #[tokio::test]
    async fn a_revision_supersedes_the_bidders_previous_bid() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 100).await;
        let bidder = Uuid::new_v4();

        let first = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, bidder, 200),
            })
            .await
            .unwrap();
        let second = store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, bidder, 350),
            })
            .await
            .unwrap();

        let bids = store
            .bid_service
            .get_bids(GetBidsInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(bids.len(), 2);
        let active: Vec<_> = bids
            .iter()
            .filter(|bid| bid.bidder == bidder && bid.status.is_active())
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);
        assert_eq!(active[0].amount, 350);
        assert_eq!(
            bids.iter().find(|bid| bid.id == first.id).unwrap().status,
            BidStatus::Outbid
        );
    }

    #[tokio::test]
    async fn a_non_improving_revision_is_accepted_but_does_not_lead() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 100).await;
        let leader = Uuid::new_v4();
        let reviser = Uuid::new_v4();

        for (bidder, amount) in [(leader, 500), (reviser, 300), (reviser, 400)] {
            store
                .bid_service
                .handle_bid(HandleBidInput {
                    bid_create: bid_create(auction.id, bidder, amount),
                })
                .await
                .unwrap();
        }

        let highest = store
            .bid_service
            .get_highest_active_bid(GetHighestActiveBidInput {
                auction_id: auction.id,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(highest.bidder, leader);
        assert_eq!(highest.amount, 500);
    }

    #[tokio::test]
    async fn competing_bids_never_mutate_each_other() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 100).await;
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, first, 200),
            })
            .await
            .unwrap();
        store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, second, 900),
            })
            .await
            .unwrap();

        let bids = store
            .bid_service
            .get_bids(GetBidsInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        // Being outbid competitively is only visible through the aggregate;
        // the lower bid row stays active.
        assert!(bids
            .iter()
            .all(|bid| bid.status == BidStatus::Active));
        let highest = store
            .bid_service
            .get_highest_active_bid(GetHighestActiveBidInput {
                auction_id: auction.id,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(highest.bidder, second);
    }

    #[tokio::test]
    async fn bids_are_listed_by_amount_then_recency() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let auction = seeded_auction(&store, Duration::hours(-1), Duration::hours(1), 100).await;

        for amount in [300, 500, 400] {
            store
                .bid_service
                .handle_bid(HandleBidInput {
                    bid_create: bid_create(auction.id, Uuid::new_v4(), amount),
                })
                .await
                .unwrap();
        }

        let bids = store
            .bid_service
            .get_bids(GetBidsInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        let amounts: Vec<_> = bids.iter().map(|bid| bid.amount).collect();
        assert_eq!(amounts, vec![500, 400, 300]);
    }
}
