use {
    super::repository::{
        Database,
        Repository,
    },
    crate::state::StoreNew,
    std::sync::{
        Arc,
        Weak,
    },
};

pub mod add_batch;
pub mod delete_batch;
pub mod get_batch;
pub mod get_batches;
pub mod update_batch_status;

pub struct Service {
    store: Weak<StoreNew>,
    repo:  Arc<Repository>,
}

impl Service {
    pub fn new(db: impl Database, store: Weak<StoreNew>) -> Self {
        Self {
            store,
            repo: Arc::new(Repository::new(db)),
        }
    }

    pub(crate) fn get_store(&self) -> Arc<StoreNew> {
        self.store.upgrade().expect("Store is missing")
    }
}
