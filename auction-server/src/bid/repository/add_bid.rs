use {
    super::{
        models,
        Repository,
    },
    crate::{
        api::RestError,
        bid::entities,
    },
    time::OffsetDateTime,
};

impl Repository {
    /// Callers must hold the (auction, bidder) bid lock. The storage write and
    /// the in-memory swap happen before the lock is released, so the
    /// at-most-one-active-bid invariant is never observably violated.
    pub async fn add_bid(
        &self,
        create: entities::BidCreate,
        supersede: Option<entities::BidId>,
    ) -> Result<entities::Bid, RestError> {
        let model = models::Bid::new(&create, OffsetDateTime::now_utc());
        let bid = model.get_bid_entity().map_err(|e| {
            tracing::error!(error = e.to_string(), bid_create = ?create, "Failed to convert bid to entity");
            RestError::TemporarilyUnavailable
        })?;
        self.db.add_bid(&model, supersede).await?;

        let mut write_guard = self.in_memory_store.bids.write().await;
        let bids = write_guard.entry(create.auction_id).or_default();
        if let Some(superseded) = supersede {
            if let Some(previous) = bids.iter_mut().find(|b| b.id == superseded) {
                previous.status = entities::BidStatus::Outbid;
            }
        }
        bids.push(bid.clone());
        Ok(bid)
    }
}
