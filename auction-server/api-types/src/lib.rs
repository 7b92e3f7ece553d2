use {
    serde::{
        Deserialize,
        Serialize,
    },
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

pub mod allocation;
pub mod auction;
pub mod batch;
pub mod bid;

/// Monetary values are integer minor units of the platform currency.
pub type Amount = u64;

#[derive(ToResponse, ToSchema, Serialize, Deserialize)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    pub error: String,
}
