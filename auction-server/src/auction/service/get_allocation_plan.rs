use {
    super::Service,
    crate::{
        allocation::{
            entities::{
                AllocationPlan,
                CategoryBids,
            },
            optimizer,
        },
        api::RestError,
        auction::entities,
        batch::{
            entities::BatchId,
            service::get_batch::GetBatchInput,
        },
        bid::service::get_best_bids::GetBestBidsInput,
    },
};

pub struct GetAllocationPlanInput {
    pub batch_id: BatchId,
}

impl Service {
    /// The advisory "current best disposal plan" for a batch. Re-derivable at
    /// any time before close; at close it is the authoritative basis for the
    /// resolver's assignment.
    #[tracing::instrument(skip_all, fields(batch_id))]
    pub async fn get_allocation_plan(
        &self,
        input: GetAllocationPlanInput,
    ) -> Result<AllocationPlan, RestError> {
        tracing::Span::current().record("batch_id", input.batch_id.to_string());
        let store = self.get_store();
        store
            .batch_service
            .get_batch(GetBatchInput {
                batch_id: input.batch_id,
            })
            .await?;

        let auctions: Vec<entities::Auction> = self
            .repo
            .get_auctions_by_batch(input.batch_id)
            .await?
            .into_iter()
            .filter(|auction| !auction.cancelled)
            .collect();
        self.compute_allocation_plan(&auctions).await
    }

    /// Collects each auction's standing offers and runs the optimizer: lot
    /// auctions feed the itemized side, the whole-batch auction the bundled
    /// side. Separate lot bids never combine into a bundle.
    pub(super) async fn compute_allocation_plan(
        &self,
        auctions: &[entities::Auction],
    ) -> Result<AllocationPlan, RestError> {
        let store = self.get_store();
        let mut categories = Vec::new();
        let mut whole_batch_bids = Vec::new();
        for auction in auctions {
            let best = store
                .bid_service
                .get_best_bids(GetBestBidsInput {
                    auction_id: auction.id,
                })
                .await?;
            match auction.lot {
                entities::AuctionLot::WholeBatch => whole_batch_bids.extend(best),
                entities::AuctionLot::Medium { medium } => {
                    categories.push(CategoryBids { medium, bids: best })
                }
            }
        }
        Ok(optimizer::compute_plan(
            &categories,
            &whole_batch_bids,
            self.config.vendor_admin_cost,
        ))
    }
}
