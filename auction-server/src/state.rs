use {
    crate::{
        auction,
        batch,
        bid,
        config::Config,
        kernel::{
            db::DB,
            user_directory::UserDirectory,
        },
    },
    std::sync::Arc,
    tokio_util::task::TaskTracker,
};

/// Dependency-injection root. Every component receives its storage handle and
/// collaborators explicitly; there is no global database singleton.
pub struct StoreNew {
    pub db:              DB,
    pub secret_key:      String,
    pub task_tracker:    TaskTracker,
    pub batch_service:   Arc<batch::service::Service>,
    pub auction_service: Arc<auction::service::Service>,
    pub bid_service:     Arc<bid::service::Service>,
}

impl StoreNew {
    pub fn new(db: DB, config: Config, secret_key: String, task_tracker: TaskTracker) -> Arc<Self> {
        Arc::new_cyclic(|store| {
            let user_directory: Arc<dyn UserDirectory> = Arc::new(db.clone());
            Self {
                batch_service: Arc::new(batch::service::Service::new(db.clone(), store.clone())),
                auction_service: Arc::new(auction::service::Service::new(
                    db.clone(),
                    auction::service::Config {
                        vendor_admin_cost: config.allocation.vendor_admin_cost,
                    },
                    task_tracker.clone(),
                    store.clone(),
                )),
                bid_service: Arc::new(bid::service::Service::new(
                    db.clone(),
                    user_directory,
                    store.clone(),
                )),
                db,
                secret_key,
                task_tracker,
            }
        })
    }
}
