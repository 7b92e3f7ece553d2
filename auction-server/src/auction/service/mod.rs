use {
    super::repository::{
        Database,
        Repository,
    },
    crate::{
        kernel::entities::Amount,
        state::StoreNew,
    },
    std::sync::{
        Arc,
        Weak,
    },
    tokio_util::task::TaskTracker,
};

pub mod add_auction;
pub mod cancel_auction;
pub mod get_allocation_plan;
pub mod get_auction;
pub mod get_auctions_by_batch;
pub mod resolve_auction;
mod verification;

pub struct Config {
    /// Fixed administrative overhead charged once per distinct contracted
    /// vendor, in minor units.
    pub vendor_admin_cost: Amount,
}

pub struct Service {
    store:        Weak<StoreNew>,
    config:       Config,
    repo:         Arc<Repository>,
    task_tracker: TaskTracker,
}

impl Service {
    pub fn new(
        db: impl Database,
        config: Config,
        task_tracker: TaskTracker,
        store: Weak<StoreNew>,
    ) -> Self {
        Self {
            store,
            config,
            repo: Arc::new(Repository::new(db)),
            task_tracker,
        }
    }

    pub(crate) fn get_store(&self) -> Arc<StoreNew> {
        self.store.upgrade().expect("Store is missing")
    }
}
