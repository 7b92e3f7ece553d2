use {
    super::{
        get_auction::GetAuctionInput,
        Service,
    },
    crate::{
        allocation::entities::Strategy,
        api::RestError,
        auction::entities,
        batch::{
            entities::BatchStatus,
            service::update_batch_status::UpdateBatchStatusInput,
        },
        bid::service::finalize_auction_bids::FinalizeAuctionBidsInput,
        kernel::entities::Amount,
    },
    std::collections::HashMap,
    time::OffsetDateTime,
};

pub struct ResolveAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Finalizes a batch's auctions once every lot is off the clock. The
    /// allocation plan picks the strategy; winning bids are marked, losers
    /// demoted, winners recorded, and the batch advanced. Idempotent: a
    /// concluded auction reports its recorded result and mutates nothing.
    #[tracing::instrument(skip_all, fields(auction_id, batch_id), err(level = tracing::Level::TRACE))]
    pub async fn resolve_auction(
        &self,
        input: ResolveAuctionInput,
    ) -> Result<entities::Resolution, RestError> {
        tracing::Span::current().record("auction_id", input.auction_id.to_string());
        let auction = self
            .get_auction(GetAuctionInput {
                auction_id: input.auction_id,
            })
            .await?;
        tracing::Span::current().record("batch_id", auction.batch_id.to_string());

        let lock = self.repo.get_or_create_auction_lock(auction.batch_id).await;
        let _guard = lock.lock().await;

        // Re-read under the lock; a concurrent resolver may have finished.
        let auction = self
            .get_auction(GetAuctionInput {
                auction_id: input.auction_id,
            })
            .await?;
        if auction.is_concluded() {
            return Ok(entities::Resolution::AlreadyResolved {
                winner: auction.winner,
            });
        }

        let now = OffsetDateTime::now_utc();
        match auction.derive_status(now) {
            entities::AuctionStatus::Cancelled => {
                return Err(RestError::BadParameters(
                    "auction has been cancelled".to_string(),
                ))
            }
            entities::AuctionStatus::Pending | entities::AuctionStatus::Active => {
                return Err(RestError::AuctionNotEnded)
            }
            entities::AuctionStatus::Ended => {}
        }

        let siblings: Vec<entities::Auction> = self
            .repo
            .get_auctions_by_batch(auction.batch_id)
            .await?
            .into_iter()
            .filter(|sibling| !sibling.cancelled)
            .collect();
        // The batch settles as a whole; a lot still on the clock blocks it.
        if siblings.iter().any(|sibling| {
            matches!(
                sibling.derive_status(now),
                entities::AuctionStatus::Pending | entities::AuctionStatus::Active
            )
        }) {
            return Err(RestError::AuctionNotEnded);
        }

        let plan = self.compute_allocation_plan(&siblings).await?;

        let mut awards: HashMap<entities::AuctionId, entities::AuctionWinner> = HashMap::new();
        match (plan.selected, &plan.itemized, &plan.bundled) {
            (Some(Strategy::Bundled), _, Some(bundled)) => {
                if let Some(whole) = siblings
                    .iter()
                    .find(|sibling| sibling.lot == entities::AuctionLot::WholeBatch)
                {
                    awards.insert(
                        whole.id,
                        entities::AuctionWinner {
                            bidder: bundled.bidder,
                            amount: bundled.total,
                        },
                    );
                }
            }
            (Some(Strategy::Itemized), Some(itemized), _) => {
                for award in &itemized.awards {
                    let lot = entities::AuctionLot::Medium {
                        medium: award.medium,
                    };
                    if let Some(lot_auction) =
                        siblings.iter().find(|sibling| sibling.lot == lot)
                    {
                        awards.insert(
                            lot_auction.id,
                            entities::AuctionWinner {
                                bidder: award.bidder,
                                amount: award.amount,
                            },
                        );
                    }
                }
            }
            _ => {}
        }

        // Reserve prices gate the win: every awarded amount must meet its
        // auction's reserve or the whole resolution yields no winner.
        let reserve_failure: Option<(Amount, Amount)> = siblings.iter().find_map(|sibling| {
            let award = awards.get(&sibling.id)?;
            let reserve = sibling.reserve_price?;
            (award.amount < reserve).then_some((award.amount, reserve))
        });
        let no_winner = awards.is_empty() || reserve_failure.is_some();

        let store = self.get_store();
        let mut requested_winner = None;
        for sibling in &siblings {
            let winner = if no_winner {
                None
            } else {
                awards.get(&sibling.id).cloned()
            };
            let concluded = self
                .repo
                .conclude_auction(sibling.id, winner.clone(), now)
                .await?;
            if !concluded {
                // Another resolver got here first; report its result.
                if sibling.id == input.auction_id {
                    let current = self
                        .get_auction(GetAuctionInput {
                            auction_id: input.auction_id,
                        })
                        .await?;
                    return Ok(entities::Resolution::AlreadyResolved {
                        winner: current.winner,
                    });
                }
                continue;
            }
            store
                .bid_service
                .finalize_auction_bids(FinalizeAuctionBidsInput {
                    auction_id: sibling.id,
                    winner:     winner.as_ref().map(|w| w.bidder),
                })
                .await?;
            if sibling.id == input.auction_id {
                requested_winner = winner;
            }
        }

        let batch_status = if no_winner {
            BatchStatus::AuctionEnded
        } else {
            BatchStatus::Allocated
        };
        store
            .batch_service
            .update_batch_status(UpdateBatchStatusInput {
                batch_id: auction.batch_id,
                status:   batch_status,
            })
            .await?;

        if no_winner {
            let highest = match (plan.selected, &plan.itemized, &plan.bundled) {
                (Some(Strategy::Bundled), _, Some(bundled)) => Some(bundled.total),
                (Some(Strategy::Itemized), Some(itemized), _) => {
                    itemized.awards.iter().map(|award| award.amount).max()
                }
                _ => None,
            };
            tracing::info!(
                batch_id = auction.batch_id.to_string(),
                "Auction batch resolved without an eligible winner"
            );
            return Ok(entities::Resolution::NoEligibleWinner {
                highest,
                reserve_price: reserve_failure
                    .map(|(_, reserve)| reserve)
                    .or(auction.reserve_price),
            });
        }
        Ok(entities::Resolution::Resolved {
            winner: requested_winner,
            plan,
        })
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
                    AuctionWinner,
                    Resolution,
                },
                service::{
                    add_auction::AddAuctionInput,
                    get_allocation_plan::GetAllocationPlanInput,
                },
            },
            batch::{
                entities as batch_entities,
                service::{
                    add_batch::AddBatchInput,
                    get_batch::GetBatchInput,
                },
            },
            bid::{
                entities::{
                    BidCreate,
                    BidStatus,
                },
                service::{
                    get_bids::GetBidsInput,
                    handle_bid::HandleBidInput,
                },
            },
            kernel::entities::BidderId,
            state::{
                test_utils::Mocks,
                StoreNew,
            },
        },
        std::sync::Arc,
        time::Duration,
        uuid::Uuid,
    };

    const BID_WINDOW: Duration = Duration::milliseconds(1500);

    fn batch_create(media: &[batch_entities::Medium]) -> batch_entities::BatchCreate {
        batch_entities::BatchCreate {
            batch_number:        format!("WB-{}", Uuid::new_v4()),
            title:               "tail material".to_string(),
            description:         String::new(),
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

    async fn open_auction(
        store: &Arc<StoreNew>,
        batch_id: batch_entities::BatchId,
        lot: AuctionLot,
        end_offset: Duration,
        reserve_price: Option<u64>,
    ) -> entities::Auction {
        let now = OffsetDateTime::now_utc();
        store
            .auction_service
            .add_auction(AddAuctionInput {
                auction_create: AuctionCreate {
                    batch_id,
                    lot,
                    start_time: now - Duration::hours(1),
                    end_time: now + end_offset,
                    base_price: 100,
                    reserve_price,
                },
            })
            .await
            .unwrap()
    }

    async fn place_bid(
        store: &Arc<StoreNew>,
        auction_id: entities::AuctionId,
        bidder: BidderId,
        amount: u64,
    ) {
        store
            .bid_service
            .handle_bid(HandleBidInput {
                bid_create: BidCreate {
                    auction_id,
                    bidder,
                    amount,
                    note: None,
                },
            })
            .await
            .unwrap();
    }

    async fn wait_for_close() {
        tokio::time::sleep(std::time::Duration::from_millis(2000)).await;
    }

    async fn bid_statuses(
        store: &Arc<StoreNew>,
        auction_id: entities::AuctionId,
    ) -> Vec<(BidderId, u64, BidStatus)> {
        store
            .bid_service
            .get_bids(GetBidsInput { auction_id })
            .await
            .unwrap()
            .into_iter()
            .map(|bid| (bid.bidder, bid.amount, bid.status))
            .collect()
    }

    #[tokio::test]
    async fn resolving_a_running_auction_fails() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[batch_entities::Medium::Paper]),
            })
            .await
            .unwrap();
        let auction =
            open_auction(&store, batch.id, AuctionLot::WholeBatch, Duration::hours(1), None).await;

        let result = store
            .auction_service
            .resolve_auction(ResolveAuctionInput {
                auction_id: auction.id,
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::AuctionNotEnded);
    }

    #[tokio::test]
    async fn a_lot_still_on_the_clock_blocks_the_batch() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[
                    batch_entities::Medium::Paper,
                    batch_entities::Medium::Electronic,
                ]),
            })
            .await
            .unwrap();
        let paper = open_auction(
            &store,
            batch.id,
            AuctionLot::Medium {
                medium: batch_entities::Medium::Paper,
            },
            BID_WINDOW,
            None,
        )
        .await;
        open_auction(
            &store,
            batch.id,
            AuctionLot::Medium {
                medium: batch_entities::Medium::Electronic,
            },
            Duration::hours(5),
            None,
        )
        .await;
        wait_for_close().await;

        let result = store
            .auction_service
            .resolve_auction(ResolveAuctionInput {
                auction_id: paper.id,
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::AuctionNotEnded);
    }

    #[tokio::test]
    async fn itemized_resolution_awards_each_lot_to_its_highest_bidder() {
        // Scenario: X bids 500 on paper; Y bids 300 on paper and 800 on
        // electronic. No whole-batch bid exists, so the itemized plan wins:
        // 1300 gross, two vendors, 100 net.
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[
                    batch_entities::Medium::Paper,
                    batch_entities::Medium::Electronic,
                ]),
            })
            .await
            .unwrap();
        let paper = open_auction(
            &store,
            batch.id,
            AuctionLot::Medium {
                medium: batch_entities::Medium::Paper,
            },
            BID_WINDOW,
            None,
        )
        .await;
        let electronic = open_auction(
            &store,
            batch.id,
            AuctionLot::Medium {
                medium: batch_entities::Medium::Electronic,
            },
            BID_WINDOW,
            None,
        )
        .await;

        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        place_bid(&store, paper.id, x, 500).await;
        place_bid(&store, paper.id, y, 300).await;
        place_bid(&store, electronic.id, y, 800).await;
        wait_for_close().await;

        let resolution = store
            .auction_service
            .resolve_auction(ResolveAuctionInput {
                auction_id: paper.id,
            })
            .await
            .unwrap();
        match resolution {
            Resolution::Resolved { winner, plan } => {
                assert_eq!(
                    winner,
                    Some(AuctionWinner {
                        bidder: x,
                        amount: 500,
                    })
                );
                let itemized = plan.itemized.unwrap();
                assert_eq!(itemized.gross, 1300);
                assert_eq!(itemized.net, 100);
                assert!(plan.bundled.is_none());
            }
            other => panic!("expected a resolved outcome, got {:?}", other),
        }

        let electronic_after = store
            .auction_service
            .get_auction(GetAuctionInput {
                auction_id: electronic.id,
            })
            .await
            .unwrap();
        assert_eq!(
            electronic_after.winner,
            Some(AuctionWinner {
                bidder: y,
                amount: 800,
            })
        );

        let paper_bids = bid_statuses(&store, paper.id).await;
        assert!(paper_bids.contains(&(x, 500, BidStatus::Winning)));
        assert!(paper_bids.contains(&(y, 300, BidStatus::Outbid)));
        assert_eq!(
            bid_statuses(&store, electronic.id).await,
            vec![(y, 800, BidStatus::Winning)]
        );

        let batch_after = store
            .batch_service
            .get_batch(GetBatchInput { batch_id: batch.id })
            .await
            .unwrap();
        assert_eq!(batch_after.status, batch_entities::BatchStatus::Allocated);
    }

    #[tokio::test]
    async fn a_bundled_bid_wins_on_net_despite_a_lower_gross() {
        // Scenario: itemized gross 1300 nets 100 after two vendor fees; Z's
        // whole-batch 1250 nets 650 after one. The bundle takes everything.
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[
                    batch_entities::Medium::Paper,
                    batch_entities::Medium::Electronic,
                ]),
            })
            .await
            .unwrap();
        let paper = open_auction(
            &store,
            batch.id,
            AuctionLot::Medium {
                medium: batch_entities::Medium::Paper,
            },
            BID_WINDOW,
            None,
        )
        .await;
        let electronic = open_auction(
            &store,
            batch.id,
            AuctionLot::Medium {
                medium: batch_entities::Medium::Electronic,
            },
            BID_WINDOW,
            None,
        )
        .await;
        let whole = open_auction(&store, batch.id, AuctionLot::WholeBatch, BID_WINDOW, None).await;

        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let z = Uuid::new_v4();
        place_bid(&store, paper.id, x, 500).await;
        place_bid(&store, paper.id, y, 300).await;
        place_bid(&store, electronic.id, y, 800).await;
        place_bid(&store, whole.id, z, 1250).await;
        wait_for_close().await;

        let resolution = store
            .auction_service
            .resolve_auction(ResolveAuctionInput {
                auction_id: whole.id,
            })
            .await
            .unwrap();
        match resolution {
            Resolution::Resolved { winner, plan } => {
                assert_eq!(
                    winner,
                    Some(AuctionWinner {
                        bidder: z,
                        amount: 1250,
                    })
                );
                assert_eq!(plan.itemized.unwrap().net, 100);
                assert_eq!(plan.bundled.unwrap().net, 650);
            }
            other => panic!("expected a resolved outcome, got {:?}", other),
        }

        // The lot auctions conclude without winners; their bids lose.
        let paper_after = store
            .auction_service
            .get_auction(GetAuctionInput {
                auction_id: paper.id,
            })
            .await
            .unwrap();
        assert!(paper_after.is_concluded());
        assert_eq!(paper_after.winner, None);
        assert!(bid_statuses(&store, paper.id)
            .await
            .iter()
            .all(|(_, _, status)| *status == BidStatus::Outbid));
        assert!(bid_statuses(&store, electronic.id)
            .await
            .iter()
            .all(|(_, _, status)| *status == BidStatus::Outbid));
        assert_eq!(
            bid_statuses(&store, whole.id).await,
            vec![(z, 1250, BidStatus::Winning)]
        );

        let batch_after = store
            .batch_service
            .get_batch(GetBatchInput { batch_id: batch.id })
            .await
            .unwrap();
        assert_eq!(batch_after.status, batch_entities::BatchStatus::Allocated);
    }

    #[tokio::test]
    async fn a_reserve_shortfall_yields_no_winner_and_keeps_the_batch() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[batch_entities::Medium::Paper]),
            })
            .await
            .unwrap();
        let auction = open_auction(
            &store,
            batch.id,
            AuctionLot::WholeBatch,
            BID_WINDOW,
            Some(1000),
        )
        .await;
        let bidder = Uuid::new_v4();
        place_bid(&store, auction.id, bidder, 800).await;
        wait_for_close().await;

        let resolution = store
            .auction_service
            .resolve_auction(ResolveAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        match resolution {
            Resolution::NoEligibleWinner {
                highest,
                reserve_price,
            } => {
                assert_eq!(highest, Some(800));
                assert_eq!(reserve_price, Some(1000));
            }
            other => panic!("expected no eligible winner, got {:?}", other),
        }

        assert!(bid_statuses(&store, auction.id)
            .await
            .iter()
            .all(|(_, _, status)| *status == BidStatus::Outbid));
        let batch_after = store
            .batch_service
            .get_batch(GetBatchInput { batch_id: batch.id })
            .await
            .unwrap();
        assert_eq!(batch_after.status, batch_entities::BatchStatus::AuctionEnded);
    }

    #[tokio::test]
    async fn resolving_twice_returns_the_recorded_result() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[batch_entities::Medium::Paper]),
            })
            .await
            .unwrap();
        let auction =
            open_auction(&store, batch.id, AuctionLot::WholeBatch, BID_WINDOW, None).await;
        let bidder = Uuid::new_v4();
        place_bid(&store, auction.id, bidder, 400).await;
        wait_for_close().await;

        let first = store
            .auction_service
            .resolve_auction(ResolveAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        let expected = AuctionWinner {
            bidder,
            amount: 400,
        };
        match first {
            Resolution::Resolved { winner, .. } => assert_eq!(winner, Some(expected.clone())),
            other => panic!("expected a resolved outcome, got {:?}", other),
        }

        let bids_before = bid_statuses(&store, auction.id).await;
        let second = store
            .auction_service
            .resolve_auction(ResolveAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        match second {
            Resolution::AlreadyResolved { winner } => assert_eq!(winner, Some(expected)),
            other => panic!("expected already resolved, got {:?}", other),
        }
        assert_eq!(bid_statuses(&store, auction.id).await, bids_before);
    }

    #[tokio::test]
    async fn concurrent_resolves_agree_on_a_single_winner() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[batch_entities::Medium::Paper]),
            })
            .await
            .unwrap();
        let auction =
            open_auction(&store, batch.id, AuctionLot::WholeBatch, BID_WINDOW, None).await;
        let bidder = Uuid::new_v4();
        place_bid(&store, auction.id, bidder, 700).await;
        wait_for_close().await;

        let (first, second) = tokio::join!(
            store.auction_service.resolve_auction(ResolveAuctionInput {
                auction_id: auction.id,
            }),
            store.auction_service.resolve_auction(ResolveAuctionInput {
                auction_id: auction.id,
            }),
        );
        let outcomes = [first.unwrap(), second.unwrap()];
        let resolved = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Resolution::Resolved { .. }))
            .count();
        let already = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Resolution::AlreadyResolved { .. }))
            .count();
        assert_eq!((resolved, already), (1, 1));

        let winning_bids: Vec<_> = bid_statuses(&store, auction.id)
            .await
            .into_iter()
            .filter(|(_, _, status)| *status == BidStatus::Winning)
            .collect();
        assert_eq!(winning_bids.len(), 1);
    }

    #[tokio::test]
    async fn the_advisory_plan_matches_the_resolution_basis() {
        let store = StoreNew::new_with_mocks(Mocks::default());
        let batch = store
            .batch_service
            .add_batch(AddBatchInput {
                batch_create: batch_create(&[batch_entities::Medium::Paper]),
            })
            .await
            .unwrap();
        let auction =
            open_auction(&store, batch.id, AuctionLot::WholeBatch, Duration::hours(1), None).await;
        place_bid(&store, auction.id, Uuid::new_v4(), 900).await;

        let plan = store
            .auction_service
            .get_allocation_plan(GetAllocationPlanInput { batch_id: batch.id })
            .await
            .unwrap();
        assert_eq!(plan.selected, Some(Strategy::Bundled));
        assert_eq!(plan.bundled.unwrap().total, 900);
        assert_eq!(plan.vendor_admin_cost, 600);
    }
}
