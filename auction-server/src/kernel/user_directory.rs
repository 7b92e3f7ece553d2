#[cfg(test)]
use mockall::automock;
use {
    crate::{
        api::RestError,
        kernel::{
            db::DB,
            entities::BidderId,
        },
        models::Bidder,
    },
    axum::async_trait,
    std::fmt::Debug,
};

/// Read-only view of the external user directory. Bidder identity and the
/// approved flag come from there; the engine does no KYC of its own.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Debug + Send + Sync + 'static {
    async fn get_bidder(&self, bidder_id: BidderId) -> Result<Option<Bidder>, RestError>;
}

#[async_trait]
impl UserDirectory for DB {
    #[tracing::instrument(skip_all, fields(bidder_id))]
    async fn get_bidder(&self, bidder_id: BidderId) -> Result<Option<Bidder>, RestError> {
        tracing::Span::current().record("bidder_id", bidder_id.to_string());
        sqlx::query_as("SELECT id, display_name, approved FROM bidder WHERE id = $1")
            .bind(bidder_id)
            .fetch_optional(self)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = e.to_string(),
                    "Failed to get bidder from user directory"
                );
                RestError::TemporarilyUnavailable
            })
    }
}
