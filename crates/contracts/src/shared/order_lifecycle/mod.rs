//! Order lifecycle engine: canonical status, aggregation and date ordering.
//!
//! Everything here is pure. Callers fetch the snapshot, the engine only
//! computes over it.

pub mod aggregate;
pub mod dates;
pub mod status;

pub use aggregate::{aggregate, classify_stock, revenue_shares, UNCATEGORIZED};
pub use dates::{
    normalize_date, parse_order_date, sort_by_date_desc, sort_by_date_desc_with,
    try_parse_order_date,
};
pub use status::{resolve, timeline, ResolvedStatus, TimelineEvent, TimelineKind};
