use {
    super::{
        Auth,
        RestError,
    },
    crate::{
        auction::service::{
            add_auction::AddAuctionInput,
            cancel_auction::CancelAuctionInput,
            get_auction::GetAuctionInput,
            resolve_auction::ResolveAuctionInput,
        },
        state::StoreNew,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
    },
    salvage_auction_api_types::{
        auction::{
            Auction,
            AuctionCreate,
            AuctionId,
            AuctionSummary,
            ResolutionOutcome,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
    time::OffsetDateTime,
};

/// Open an auction against a batch: one medium lot, or the batch as a whole.
///
/// The window must have a strictly positive duration and the base price must
/// be positive. Requires the admin bearer token.
#[utoipa::path(post, path = "/v1/auctions", request_body = AuctionCreate,
    security(("bearerAuth" = [])),
    responses(
    (status = 200, description = "The opened auction", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Batch was not found", body = ErrorBodyResponse),
),)]
pub async fn post_auction(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Json(auction_create): Json<AuctionCreate>,
) -> Result<Json<Auction>, RestError> {
    match auth {
        Auth::Admin => {
            let auction = store
                .auction_service
                .add_auction(AddAuctionInput {
                    auction_create: auction_create.into(),
                })
                .await?;
            Ok(Json(auction.to_api_auction(OffsetDateTime::now_utc())))
        }
        _ => Err(RestError::Unauthorized),
    }
}

/// Query the live view of an auction.
///
/// The status is derived from the clock on every read; the highest active bid
/// and active-bid count reflect the current standing bids.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}",
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
    (status = 200, description = "The live auction view", body = AuctionSummary),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_auction(
    State(store): State<Arc<StoreNew>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<AuctionSummary>, RestError> {
    let summary = store
        .auction_service
        .get_auction_summary(GetAuctionInput { auction_id })
        .await?;
    Ok(Json(summary.into()))
}

/// Cancel an auction before it ends. A terminal administrative override:
/// active bids are voided and the auction never resolves.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/cancel",
    security(("bearerAuth" = [])),
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
    (status = 200, description = "The cancelled auction", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn post_cancel_auction(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<Auction>, RestError> {
    match auth {
        Auth::Admin => {
            let auction = store
                .auction_service
                .cancel_auction(CancelAuctionInput { auction_id })
                .await?;
            Ok(Json(auction.to_api_auction(OffsetDateTime::now_utc())))
        }
        _ => Err(RestError::Unauthorized),
    }
}

/// Resolve an ended auction: settles the whole batch on the more profitable
/// of the itemized and bundled strategies.
///
/// Idempotent; a second call returns the recorded result. Resolving before
/// every lot of the batch has ended fails.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/resolve",
    security(("bearerAuth" = [])),
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
    (status = 200, description = "The resolution outcome", body = ResolutionOutcome),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn post_resolve_auction(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<ResolutionOutcome>, RestError> {
    match auth {
        Auth::Admin => {
            let resolution = store
                .auction_service
                .resolve_auction(ResolveAuctionInput { auction_id })
                .await?;
            Ok(Json(resolution.into()))
        }
        _ => Err(RestError::Unauthorized),
    }
}
