use {
    crate::kernel::entities::BidderId,
    sqlx::FromRow,
};

/// A disposal merchant as vouched for by the external user directory.
/// The engine trusts `approved` and performs no vetting of its own.
#[derive(Clone, Debug, FromRow)]
pub struct Bidder {
    pub id:           BidderId,
    pub display_name: String,
    pub approved:     bool,
}
