use {
    crate::{
        api,
        config::{
            Config,
            RunOptions,
        },
        state::StoreNew,
    },
    anyhow::anyhow,
    sqlx::postgres::PgPoolOptions,
    std::{
        sync::atomic::{
            AtomicBool,
            Ordering,
        },
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        tokio::signal::ctrl_c().await.unwrap();
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&run_options.server.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to the database: {:?}", err))?;

    let task_tracker = TaskTracker::new();
    let store = StoreNew::new(
        pool,
        config,
        run_options.admin_api_key.clone(),
        task_tracker.clone(),
    );

    api::start_api(run_options, store).await?;

    task_tracker.close();
    task_tracker.wait().await;
    Ok(())
}

// A static exit flag to indicate to running threads that we're shutting down. This is used to
// gracefully shutdown the application.
//
// NOTE: A more idiomatic approach would be to use a tokio::sync::broadcast channel, and to send a
// shutdown signal to all running tasks. However, this is a bit more complicated to implement and
// we don't rely on global state for anything else.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
