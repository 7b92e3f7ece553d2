use uuid::Uuid;

/// Monetary values are integer minor units of the platform currency.
/// Net-revenue arithmetic is done in `i64` so fees can drive a figure negative.
pub type Amount = u64;

/// The administrative actor id, issued by the back-office user store.
pub type AdminId = Uuid;

/// The bidder identity, issued by the external user directory.
pub type BidderId = Uuid;
