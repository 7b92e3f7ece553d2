use {
    super::Repository,
    crate::{
        auction::entities::AuctionId,
        bid::entities,
        kernel::entities::BidderId,
    },
};

impl Repository {
    pub async fn get_or_create_bid_lock(
        &self,
        auction_id: AuctionId,
        bidder: BidderId,
    ) -> entities::BidLock {
        self.in_memory_store
            .bid_lock
            .lock()
            .await
            .entry((auction_id, bidder))
            .or_default()
            .clone()
    }

    pub async fn get_or_create_admission_lock(
        &self,
        auction_id: AuctionId,
    ) -> entities::AdmissionLock {
        self.in_memory_store
            .admission_lock
            .lock()
            .await
            .entry(auction_id)
            .or_default()
            .clone()
    }
}
