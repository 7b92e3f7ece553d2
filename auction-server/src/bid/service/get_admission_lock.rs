use {
    super::Service,
    crate::{
        auction::entities::AuctionId,
        bid::entities::AdmissionLock,
    },
};

impl Service {
    /// Handed to the auction service so an administrative cancel can exclude
    /// in-flight bid placements on the same auction.
    pub async fn get_admission_lock(&self, auction_id: AuctionId) -> AdmissionLock {
        self.repo.get_or_create_admission_lock(auction_id).await
    }
}
