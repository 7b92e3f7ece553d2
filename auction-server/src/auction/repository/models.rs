#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        batch::entities::BatchId,
        kernel::{
            db::DB,
            entities::Amount,
        },
    },
    axum::async_trait,
    sqlx::{
        types::{
            BigDecimal,
            Json,
        },
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
#[sqlx(type_name = "auction_status", rename_all = "snake_case")]
pub enum AuctionStatus {
    Pending,
    Active,
    Ended,
    Cancelled,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Pending => AuctionStatus::Pending,
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Ended => AuctionStatus::Ended,
            entities::AuctionStatus::Cancelled => AuctionStatus::Cancelled,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Pending => entities::AuctionStatus::Pending,
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Ended => entities::AuctionStatus::Ended,
            AuctionStatus::Cancelled => entities::AuctionStatus::Cancelled,
        }
    }
}

#[derive(Clone, Debug, FromRow)]
pub struct Auction {
    pub id:              Uuid,
    pub batch_id:        Uuid,
    pub lot:             Json<entities::AuctionLot>,
    pub start_time:      PrimitiveDateTime,
    pub end_time:        PrimitiveDateTime,
    pub base_price:      BigDecimal,
    pub reserve_price:   Option<BigDecimal>,
    pub cancelled:       bool,
    pub status_cache:    AuctionStatus,
    pub winner_bidder:   Option<Uuid>,
    pub winner_amount:   Option<BigDecimal>,
    pub conclusion_time: Option<PrimitiveDateTime>,
    pub creation_time:   PrimitiveDateTime,
}

fn convert_amount(amount: &BigDecimal) -> anyhow::Result<Amount> {
    amount
        .to_string()
        .parse()
        .map_err(|e: ParseIntError| anyhow::anyhow!(e))
}

impl Auction {
    pub fn new(auction: &entities::Auction) -> Self {
        Self {
            id: auction.id,
            batch_id: auction.batch_id,
            lot: Json(auction.lot),
            start_time: to_primitive(auction.start_time),
            end_time: to_primitive(auction.end_time),
            base_price: BigDecimal::from(auction.base_price),
            reserve_price: auction.reserve_price.map(BigDecimal::from),
            cancelled: auction.cancelled,
            status_cache: auction.status_cache.into(),
            winner_bidder: auction.winner.as_ref().map(|winner| winner.bidder),
            winner_amount: auction
                .winner
                .as_ref()
                .map(|winner| BigDecimal::from(winner.amount)),
            conclusion_time: auction.conclusion_time.map(to_primitive),
            creation_time: to_primitive(auction.creation_time),
        }
    }

    pub fn get_auction_entity(&self) -> anyhow::Result<entities::Auction> {
        let winner = match (&self.winner_bidder, &self.winner_amount) {
            (Some(bidder), Some(amount)) => Some(entities::AuctionWinner {
                bidder: *bidder,
                amount: convert_amount(amount)?,
            }),
            _ => None,
        };
        Ok(entities::Auction {
            id:              self.id,
            batch_id:        self.batch_id,
            lot:             self.lot.0,
            start_time:      self.start_time.assume_offset(UtcOffset::UTC),
            end_time:        self.end_time.assume_offset(UtcOffset::UTC),
            base_price:      convert_amount(&self.base_price)?,
            reserve_price:   self
                .reserve_price
                .as_ref()
                .map(convert_amount)
                .transpose()?,
            cancelled:       self.cancelled,
            status_cache:    self.status_cache.clone().into(),
            winner,
            conclusion_time: self
                .conclusion_time
                .map(|time| time.assume_offset(UtcOffset::UTC)),
            creation_time:   self.creation_time.assume_offset(UtcOffset::UTC),
        })
    }
}

fn to_primitive(time: OffsetDateTime) -> PrimitiveDateTime {
    PrimitiveDateTime::new(time.date(), time.time())
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &Auction) -> Result<(), RestError>;
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<Option<Auction>, RestError>;
    async fn get_auctions_by_batch(&self, batch_id: BatchId) -> Result<Vec<Auction>, RestError>;
    /// Compare-and-set terminal conclusion. Returns false when another caller
    /// concluded or cancelled the auction first.
    async fn conclude_auction(
        &self,
        auction_id: entities::AuctionId,
        winner: Option<entities::AuctionWinner>,
        conclusion_time: OffsetDateTime,
    ) -> Result<bool, RestError>;
    /// Compare-and-set the terminal cancelled flag. Returns false when the
    /// auction was already concluded or cancelled.
    async fn cancel_auction(&self, auction_id: entities::AuctionId) -> Result<bool, RestError>;
    async fn update_status_cache(
        &self,
        auction_id: entities::AuctionId,
        status: AuctionStatus,
    ) -> Result<(), RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(skip_all, fields(auction_id))]
    async fn add_auction(&self, auction: &Auction) -> Result<(), RestError> {
        tracing::Span::current().record("auction_id", auction.id.to_string());
        sqlx::query(
            "INSERT INTO auction (id, batch_id, lot, start_time, end_time, base_price, reserve_price, cancelled, status_cache, winner_bidder, winner_amount, conclusion_time, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(auction.id)
        .bind(auction.batch_id)
        .bind(auction.lot.clone())
        .bind(auction.start_time)
        .bind(auction.end_time)
        .bind(auction.base_price.clone())
        .bind(auction.reserve_price.clone())
        .bind(auction.cancelled)
        .bind(auction.status_cache.clone())
        .bind(auction.winner_bidder)
        .bind(auction.winner_amount.clone())
        .bind(auction.conclusion_time)
        .bind(auction.creation_time)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to insert auction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(())
    }

    #[instrument(skip_all, fields(auction_id))]
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<Option<Auction>, RestError> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_optional(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to get auction");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(skip_all, fields(batch_id))]
    async fn get_auctions_by_batch(&self, batch_id: BatchId) -> Result<Vec<Auction>, RestError> {
        tracing::Span::current().record("batch_id", batch_id.to_string());
        sqlx::query_as("SELECT * FROM auction WHERE batch_id = $1")
            .bind(batch_id)
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "DB: Failed to get auctions for batch");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(skip_all, fields(auction_id))]
    async fn conclude_auction(
        &self,
        auction_id: entities::AuctionId,
        winner: Option<entities::AuctionWinner>,
        conclusion_time: OffsetDateTime,
    ) -> Result<bool, RestError> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        let result = sqlx::query(
            "UPDATE auction SET conclusion_time = $1, winner_bidder = $2, winner_amount = $3, status_cache = 'ended' WHERE id = $4 AND conclusion_time IS NULL AND cancelled = false",
        )
        .bind(to_primitive(conclusion_time))
        .bind(winner.as_ref().map(|w| w.bidder))
        .bind(winner.as_ref().map(|w| BigDecimal::from(w.amount)))
        .bind(auction_id)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to conclude auction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip_all, fields(auction_id))]
    async fn cancel_auction(&self, auction_id: entities::AuctionId) -> Result<bool, RestError> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        let result = sqlx::query(
            "UPDATE auction SET cancelled = true, status_cache = 'cancelled' WHERE id = $1 AND conclusion_time IS NULL AND cancelled = false",
        )
        .bind(auction_id)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to cancel auction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip_all, fields(auction_id))]
    async fn update_status_cache(
        &self,
        auction_id: entities::AuctionId,
        status: AuctionStatus,
    ) -> Result<(), RestError> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        sqlx::query(
            "UPDATE auction SET status_cache = $1 WHERE id = $2 AND conclusion_time IS NULL AND cancelled = false",
        )
        .bind(status)
        .bind(auction_id)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::error!(error = e.to_string(), "DB: Failed to update auction status cache");
            RestError::TemporarilyUnavailable
        })?;
        Ok(())
    }
}
