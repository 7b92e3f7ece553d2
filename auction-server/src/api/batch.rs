use {
    super::{
        Auth,
        RestError,
    },
    crate::{
        auction::service::get_allocation_plan::GetAllocationPlanInput,
        batch::service::{
            add_batch::AddBatchInput,
            delete_batch::DeleteBatchInput,
            get_batch::GetBatchInput,
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
        allocation::AllocationPlan,
        batch::{
            Batch,
            BatchCreate,
            BatchId,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Register a waste batch described by the catalog manager.
///
/// The batch carries the media composition the allocation engine later
/// optimizes over. Requires the admin bearer token.
#[utoipa::path(post, path = "/v1/batches", request_body = BatchCreate,
    security(("bearerAuth" = [])),
    responses(
    (status = 200, description = "The registered batch", body = Batch),
    (status = 400, response = ErrorBodyResponse),
    (status = 401, description = "Caller is not an administrator", body = ErrorBodyResponse),
),)]
pub async fn post_batch(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Json(batch_create): Json<BatchCreate>,
) -> Result<Json<Batch>, RestError> {
    match auth {
        Auth::Admin => {
            let batch = store
                .batch_service
                .add_batch(AddBatchInput {
                    batch_create: batch_create.into(),
                })
                .await?;
            Ok(Json(batch.into()))
        }
        _ => Err(RestError::Unauthorized),
    }
}

/// List all batches that have not been deleted.
#[utoipa::path(get, path = "/v1/batches", responses(
    (status = 200, description = "All registered batches", body = Vec<Batch>),
),)]
pub async fn get_batches(
    State(store): State<Arc<StoreNew>>,
) -> Result<Json<Vec<Batch>>, RestError> {
    let batches = store.batch_service.get_batches().await?;
    Ok(Json(batches.into_iter().map(Into::into).collect()))
}

/// Query a single batch.
#[utoipa::path(get, path = "/v1/batches/{batch_id}",
    params(("batch_id" = String, Path, description = "The id of the batch")),
    responses(
    (status = 200, description = "The batch", body = Batch),
    (status = 404, description = "Batch was not found", body = ErrorBodyResponse),
),)]
pub async fn get_batch(
    State(store): State<Arc<StoreNew>>,
    Path(batch_id): Path<BatchId>,
) -> Result<Json<Batch>, RestError> {
    let batch = store
        .batch_service
        .get_batch(GetBatchInput { batch_id })
        .await?;
    Ok(Json(batch.into()))
}

/// Soft-delete a batch. Rejected while an auction on the batch is open.
#[utoipa::path(delete, path = "/v1/batches/{batch_id}",
    security(("bearerAuth" = [])),
    params(("batch_id" = String, Path, description = "The id of the batch")),
    responses(
    (status = 200, description = "Batch was deleted"),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Batch was not found", body = ErrorBodyResponse),
),)]
pub async fn delete_batch(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(batch_id): Path<BatchId>,
) -> Result<Json<()>, RestError> {
    match auth {
        Auth::Admin => {
            store
                .batch_service
                .delete_batch(DeleteBatchInput { batch_id })
                .await?;
            Ok(Json(()))
        }
        _ => Err(RestError::Unauthorized),
    }
}

/// The advisory disposal plan for a batch: the itemized-versus-bundled
/// net-revenue comparison over the current standing bids.
#[utoipa::path(get, path = "/v1/batches/{batch_id}/allocation",
    security(("bearerAuth" = [])),
    params(("batch_id" = String, Path, description = "The id of the batch")),
    responses(
    (status = 200, description = "The current best disposal plan", body = AllocationPlan),
    (status = 404, description = "Batch was not found", body = ErrorBodyResponse),
),)]
pub async fn get_allocation_plan(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(batch_id): Path<BatchId>,
) -> Result<Json<AllocationPlan>, RestError> {
    match auth {
        Auth::Admin => {
            let plan = store
                .auction_service
                .get_allocation_plan(GetAllocationPlanInput { batch_id })
                .await?;
            Ok(Json(plan.into()))
        }
        _ => Err(RestError::Unauthorized),
    }
}
