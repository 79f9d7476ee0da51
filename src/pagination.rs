use serde::Serialize;

/// Native page size requested from the store per fetch.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Offset window for one native fetch against the store.
///
/// The listing order is stable (creation timestamp descending, identifier as
/// tiebreak), so consecutive windows over a static data set neither skip nor
/// duplicate records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of records fetched by this window.
    pub limit: i64,
    /// Number of records to skip before the window starts.
    pub offset: i64,
}

impl PageRequest {
    /// First window of `limit` records.
    pub fn first(limit: i64) -> Self {
        Self { limit, offset: 0 }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One fetched page plus the bookkeeping needed to continue the listing.
///
/// `total` and `has_more` describe the native result set. Predicates applied
/// in memory after the fetch may shrink `items` below the requested limit
/// without affecting either figure.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Records fetched by this window, in listing order.
    pub items: Vec<T>,
    /// Exact number of records matching the native predicates.
    pub total: i64,
    /// Whether a further window would return more records.
    pub has_more: bool,
    /// Offset at which the next window starts.
    pub next_offset: i64,
}
