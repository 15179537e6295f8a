pub mod airports;
pub mod category;
pub mod money;

pub use category::BookingType;

/// Failures surfaced by the external stores (offer store, catalog store,
/// airport lookup). Nothing here is retried; the HTTP layer maps these
/// to 5xx responses.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
