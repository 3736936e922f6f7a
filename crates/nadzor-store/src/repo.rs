//! Remote repository seam.
//!
//! The backend exposes a single areas resource: `GET` returns the full list
//! (wrapped in any of the shapes the normalizer tolerates), `PUT` replaces
//! it wholesale. The trait is transport-agnostic: HTTP, a test double, or a
//! file exchange all plug in the same way. Retry, backoff, and
//! authentication are layered on top by implementations, never here.

use nadzor_core::model::Area;

/// Abstraction over the remote areas resource.
///
/// | Operation | Wire behavior |
/// |---|---|
/// | [`fetch`](Self::fetch) | `GET <areas-resource>` → raw JSON payload |
/// | [`replace`](Self::replace) | `PUT <areas-resource>` with `{items: [...]}` |
///
/// A failed `fetch` makes the store fall back to its local cache; a failed
/// `replace` is surfaced to the caller and never retried automatically.
pub trait RemoteAreaRepository {
    /// Error type for transport operations.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Fetch the raw areas payload.
    ///
    /// The payload goes through normalization on arrival, so implementations
    /// hand back whatever the backend produced — a bare array, `{items}`,
    /// or `{data: {items}}` — without reshaping it.
    fn fetch(&mut self) -> Result<serde_json::Value, Self::Error>;

    /// Replace the remote list with `areas`.
    fn replace(&mut self, areas: &[Area]) -> Result<(), Self::Error>;
}
