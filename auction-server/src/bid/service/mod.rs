use {
    super::repository::{
        Database,
        Repository,
    },
    crate::{
        kernel::user_directory::UserDirectory,
        state::StoreNew,
    },
    std::sync::{
        Arc,
        Weak,
    },
};

pub mod cancel_auction_bids;
pub mod finalize_auction_bids;
pub mod get_active_bid_count;
pub mod get_admission_lock;
pub mod get_best_bids;
pub mod get_bids;
pub mod get_highest_active_bid;
pub mod handle_bid;
pub mod update_bid_status;
mod verification;

pub struct Service {
    store:          Weak<StoreNew>,
    repo:           Arc<Repository>,
    user_directory: Arc<dyn UserDirectory>,
}

impl Service {
    pub fn new(
        db: impl Database,
        user_directory: Arc<dyn UserDirectory>,
        store: Weak<StoreNew>,
    ) -> Self {
        Self {
            store,
            repo: Arc::new(Repository::new(db)),
            user_directory,
        }
    }

    pub(crate) fn get_store(&self) -> Arc<StoreNew> {
        self.store.upgrade().expect("Store is missing")
    }
}
