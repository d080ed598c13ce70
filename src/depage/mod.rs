//! Recursive depagination engine
//!
//! Given a query, a cursor table, and initial variables, the engine issues
//! the first call, then drains every paginated collection the table names:
//! top-level cursors page by page, and for each completed node, nested
//! cursor tables trigger the same process scoped to that node. The merged
//! tree comes back with every `pageInfo` stripped.
//!
//! # Overview
//!
//! Two mutually recursive operations do the work:
//!
//! - `merge_pages`: the multi-page loop for one cursor — locate the
//!   paginated object, strip `pageInfo`, fetch/append until the upstream
//!   reports `hasNextPage: false`.
//! - `depaginate_node`: the per-node fan-out — once a cursor is
//!   exhausted, recurse into each node whose nested collections still have
//!   pages (or deeper tables), then weld the resolved nodes back in.
//!
//! Execution is strictly sequential: one request in flight at a time, in
//! cursor/index order. Any executor error aborts the whole operation; no
//! partial tree is ever returned.

mod engine;
mod path;
mod types;

pub use engine::{depaginate, Depaginator};
pub use path::Step;
pub use types::{MergeState, PageInfo, Phase};
