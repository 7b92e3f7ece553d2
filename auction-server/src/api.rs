use {
    crate::{
        auction::entities::AuctionStatus,
        config::RunOptions,
        kernel::entities::Amount,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::StoreNew,
    },
    anyhow::Result,
    axum::{
        async_trait,
        extract::FromRequestParts,
        http::{
            request::Parts,
            StatusCode,
        },
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            delete,
            get,
            post,
        },
        Json,
        Router,
    },
    axum_extra::{
        headers::{
            authorization::Bearer,
            Authorization,
        },
        TypedHeader,
    },
    axum_prometheus::PrometheusMetricLayer,
    clap::crate_version,
    salvage_auction_api_types as api_types,
    std::sync::{
        atomic::Ordering,
        Arc,
    },
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Salvage Auction Server API {}", crate_version!())
}

pub(crate) mod auction;
pub(crate) mod batch;
pub(crate) mod bid;

#[derive(Clone, Debug, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters.
    BadParameters(String),
    /// The bid was submitted outside the auction's active window or after a
    /// cancellation; the derived status says which.
    AuctionNotActive { status: AuctionStatus },
    /// The bid amount is below the auction's base price.
    BidTooLow { minimum: Amount },
    /// Resolve was called before the auction (or a sibling lot) ended.
    AuctionNotEnded,
    /// The user directory does not vouch for this bidder.
    BidderNotApproved,
    /// The batch was not found.
    BatchNotFound,
    /// The auction was not found.
    AuctionNotFound,
    /// The caller is not an administrator.
    Unauthorized,
    /// Internal error occurred during processing the request.
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::AuctionNotActive { status } => (
                StatusCode::BAD_REQUEST,
                format!("Auction is not open for bidding (status: {})", status),
            ),
            RestError::BidTooLow { minimum } => (
                StatusCode::BAD_REQUEST,
                format!("Bid amount is too low: minimum bid is {}", minimum),
            ),
            RestError::AuctionNotEnded => (
                StatusCode::BAD_REQUEST,
                "Auction has not ended yet".to_string(),
            ),
            RestError::BidderNotApproved => (
                StatusCode::FORBIDDEN,
                "Bidder is not approved by the user directory".to_string(),
            ),
            RestError::BatchNotFound => (
                StatusCode::NOT_FOUND,
                "Batch with the specified id was not found".to_string(),
            ),
            RestError::AuctionNotFound => (
                StatusCode::NOT_FOUND,
                "Auction with the specified id was not found".to_string(),
            ),
            RestError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Invalid or missing admin token".to_string(),
            ),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl std::fmt::Display for RestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (_, msg) = self.to_status_and_message();
        f.write_str(&msg)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (
            status,
            Json(api_types::ErrorBodyResponse { error: msg }),
        )
            .into_response()
    }
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// Administrative routes are gated by a bearer token configured at startup;
/// everything else is open to bidders.
pub enum Auth {
    Admin,
    Anonymous,
}

#[async_trait]
impl FromRequestParts<Arc<StoreNew>> for Auth {
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<StoreNew>,
    ) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(header)) if header.token() == state.secret_key => Ok(Auth::Admin),
            _ => Ok(Auth::Anonymous),
        }
    }
}

pub async fn start_api(run_options: RunOptions, store: Arc<StoreNew>) -> Result<()> {
    // Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
    #[derive(OpenApi)]
    #[openapi(
    paths(
    batch::post_batch,
    batch::get_batches,
    batch::get_batch,
    batch::delete_batch,
    batch::get_allocation_plan,
    auction::post_auction,
    auction::get_auction,
    auction::post_cancel_auction,
    auction::post_resolve_auction,
    bid::post_bid,
    bid::get_bids,
    ),
    components(
    schemas(
    api_types::batch::Batch,
    api_types::batch::BatchCreate,
    api_types::batch::BatchStatus,
    api_types::batch::CompositionItem,
    api_types::batch::Medium,
    api_types::batch::WasteCategory,
    api_types::auction::Auction,
    api_types::auction::AuctionCreate,
    api_types::auction::AuctionLot,
    api_types::auction::AuctionStatus,
    api_types::auction::AuctionSummary,
    api_types::auction::AuctionWinner,
    api_types::auction::ResolutionOutcome,
    api_types::allocation::AllocationPlan,
    api_types::allocation::BundledPlan,
    api_types::allocation::CategoryAward,
    api_types::allocation::ItemizedPlan,
    api_types::allocation::Strategy,
    api_types::bid::Bid,
    api_types::bid::BidCreate,
    api_types::bid::BidResult,
    api_types::bid::BidStatus,
    api_types::ErrorBodyResponse,
    ),
    responses(
    api_types::ErrorBodyResponse,
    ),
    ),
    tags(
    (name = "Salvage Auction Server", description = "The auction engine of the destruction back-office: runs time-bounded \
    competitive bidding over salvageable waste batches and settles each batch on the more profitable of the itemized and \
    bundled disposal strategies.")
    )
    )]
    struct ApiDoc;

    let batch_routes = Router::new()
        .route("/", post(batch::post_batch))
        .route("/", get(batch::get_batches))
        .route("/:batch_id", get(batch::get_batch))
        .route("/:batch_id", delete(batch::delete_batch))
        .route("/:batch_id/allocation", get(batch::get_allocation_plan));
    let auction_routes = Router::new()
        .route("/", post(auction::post_auction))
        .route("/:auction_id", get(auction::get_auction))
        .route("/:auction_id/cancel", post(auction::post_cancel_auction))
        .route("/:auction_id/resolve", post(auction::post_resolve_auction))
        .route("/:auction_id/bids", post(bid::post_bid))
        .route("/:auction_id/bids", get(bid::get_bids));

    let v1_routes = Router::new().nest(
        "/v1",
        Router::new()
            .nest("/batches", batch_routes)
            .nest("/auctions", auction_routes),
    );

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    let app: Router<()> = Router::new()
        .merge(Redoc::with_url("/docs", ApiDoc::openapi()))
        .merge(v1_routes)
        .route("/", get(root))
        .route("/live", get(live))
        .route(
            "/metrics",
            get(move || std::future::ready(metric_handle.render())),
        )
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer)
        .with_state(store);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    tracing::info!(
        listen_addr = run_options.server.listen_addr.to_string(),
        "Starting server..."
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down RPC server...");
        })
        .await?;
    Ok(())
}
