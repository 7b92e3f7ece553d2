#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        kernel::{
            db::DB,
            entities::Amount,
        },
    },
    axum::async_trait,
    sqlx::{
        types::BigDecimal,
        FromRow,
    },
    std::{
        fmt::Debug,
        num::ParseIntError,
    },
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
    uuid::Uuid,
};

#[derive(Clone, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "bid_status", rename_all = "snake_case")]
pub enum BidStatus {
    Active,
    Outbid,
    Winning,
    Cancelled,
}

impl From<entities::BidStatus> for BidStatus {
    fn from(status: entities::BidStatus) -> Self {
        match status {
            entities::BidStatus::Active => BidStatus::Active,
            entities::BidStatus::Outbid => BidStatus::Outbid,
            entities::BidStatus::Winning => BidStatus::Winning,
            entities::BidStatus::Cancelled => BidStatus::Cancelled,
        }
    }
}

impl From<BidStatus> for entities::BidStatus {
    fn from(status: BidStatus) -> Self {
        match status {
            BidStatus::Active => entities::BidStatus::Active,
            BidStatus::Outbid => entities::BidStatus::Outbid,
            BidStatus::Winning => entities::BidStatus::Winning,
            BidStatus::Cancelled => entities::BidStatus::Cancelled,
        }
    }
}

#[derive(Clone, Debug, FromRow)]
pub struct Bid {
    pub id:         Uuid,
    pub auction_id: Uuid,
    pub bidder_id:  Uuid,
    pub amount:     BigDecimal,
    pub status:     BidStatus,
    pub bid_time:   PrimitiveDateTime,
    pub note:       Option<String>,
}

impl Bid {
    pub fn new(create: &entities::BidCreate, bid_time: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            auction_id: create.auction_id,
            bidder_id: create.bidder,
            amount: BigDecimal::from(create.amount),
            status: BidStatus::Active,
            bid_time: PrimitiveDateTime::new(bid_time.date(), bid_time.time()),
            note: create.note.clone(),
        }
    }

    pub fn get_bid_entity(&self) -> anyhow::Result<entities::Bid> {
        let amount: Amount = self
            .amount
            .to_string()
            .parse()
            .map_err(|e: ParseIntError| anyhow::anyhow!(e))?;
        Ok(entities::Bid {
            id: self.id,
            auction_id: self.auction_id,
            bidder: self.bidder_id,
            amount,
            bid_time: self.bid_time.assume_offset(UtcOffset::UTC),
            note: self.note.clone(),
            status: self.status.clone().into(),
        })
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    /// Inserts the bid and, in the same transaction, demotes the bidder's
    /// previous active bid. Observers never see two active bids of one bidder.
    async fn add_bid(&self, bid: &Bid, supersede: Option<entities::BidId>)
        -> Result<(), RestError>;
    async fn get_bids(&self, auction_id: AuctionId) -> Result<Vec<Bid>, RestError>;
    /// Moves a bid out of the active state; false when it was not active.
    async fn update_bid_status(
        &self,
        bid_id: entities::BidId,
        new_status: BidStatus,
    ) -> Result<bool, RestError>;
    async fn cancel_active_bids(&self, auction_id: AuctionId) -> Result<(), RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(skip_all, fields(bid_id, superseded_bid_id))]
    async fn add_bid(
        &self,
        bid: &Bid,
        supersede: Option<entities::BidId>,
    ) -> Result<(), RestError> {
        tracing::Span::current().record("bid_id", bid.id.to_string());
        let mut tx = self.begin().await.map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to begin bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        if let Some(superseded) = supersede {
            tracing::Span::current().record("superseded_bid_id", superseded.to_string());
            sqlx::query("UPDATE bid SET status = $1 WHERE id = $2 AND status = $3")
                .bind(BidStatus::Outbid)
                .bind(superseded)
                .bind(BidStatus::Active)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!(error = e.to_string(), "DB: Failed to supersede bid");
                    RestError::TemporarilyUnavailable
                })?;
        }
        sqlx::query(
            "INSERT INTO bid (id, auction_id, bidder_id, amount, status, bid_time, note) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(bid.id)
        .bind(bid.auction_id)
        .bind(bid.bidder_id)
        .bind(bid.amount.clone())
        .bind(bid.status.clone())
        .bind(bid.bid_time)
        .bind(&bid.note)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to insert bid");
            RestError::TemporarilyUnavailable
        })?;
        tx.commit().await.map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to commit bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(())
    }

    #[instrument(skip_all, fields(auction_id))]
    async fn get_bids(&self, auction_id: AuctionId) -> Result<Vec<Bid>, RestError> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        sqlx::query_as("SELECT * FROM bid WHERE auction_id = $1")
            .bind(auction_id)
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to get bids");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(skip_all, fields(bid_id, status))]
    async fn update_bid_status(
        &self,
        bid_id: entities::BidId,
        new_status: BidStatus,
    ) -> Result<bool, RestError> {
        tracing::Span::current().record("bid_id", bid_id.to_string());
        tracing::Span::current().record("status", format!("{:?}", new_status));
        let result = sqlx::query("UPDATE bid SET status = $1 WHERE id = $2 AND status = $3")
            .bind(new_status)
            .bind(bid_id)
            .bind(BidStatus::Active)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to update bid status");
                RestError::TemporarilyUnavailable
            })?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip_all, fields(auction_id))]
    async fn cancel_active_bids(&self, auction_id: AuctionId) -> Result<(), RestError> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        sqlx::query("UPDATE bid SET status = $1 WHERE auction_id = $2 AND status = $3")
            .bind(BidStatus::Cancelled)
            .bind(auction_id)
            .bind(BidStatus::Active)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to cancel active bids");
                RestError::TemporarilyUnavailable
            })?;
        Ok(())
    }
}
