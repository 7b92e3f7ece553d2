use {
    super::RestError,
    crate::{
        auction::service::get_auction::GetAuctionInput,
        bid::{
            entities,
            service::{
                get_bids::GetBidsInput,
                handle_bid::HandleBidInput,
            },
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
        auction::AuctionId,
        bid::{
            Bid,
            BidCreate,
            BidResult,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Place a bid on an auction.
///
/// The bid is admitted only while the clock says the auction is active and
/// only for at least the base price. A bidder's new bid supersedes their own
/// previous one; it does not have to beat the current highest bid.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/bids", request_body = BidCreate,
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
    (status = 200, description = "Bid was placed successfully", body = BidResult),
    (status = 400, response = ErrorBodyResponse),
    (status = 403, description = "Bidder is not approved", body = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn post_bid(
    State(store): State<Arc<StoreNew>>,
    Path(auction_id): Path<AuctionId>,
    Json(bid_create): Json<BidCreate>,
) -> Result<Json<BidResult>, RestError> {
    let bid = store
        .bid_service
        .handle_bid(HandleBidInput {
            bid_create: entities::BidCreate {
                auction_id,
                bidder: bid_create.bidder,
                amount: bid_create.amount,
                note: bid_create.note,
            },
        })
        .await?;
    Ok(Json(BidResult {
        status: "OK".to_string(),
        id:     bid.id,
    }))
}

/// The full bid history of an auction, highest amount first and most recent
/// first among equal amounts.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}/bids",
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
    (status = 200, description = "The auction's bids", body = Vec<Bid>),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_bids(
    State(store): State<Arc<StoreNew>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<Vec<Bid>>, RestError> {
    store
        .auction_service
        .get_auction(GetAuctionInput { auction_id })
        .await?;
    let bids = store
        .bid_service
        .get_bids(GetBidsInput { auction_id })
        .await?;
    Ok(Json(bids.into_iter().map(Into::into).collect()))
}
