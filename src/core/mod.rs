/// Dashboard statistics over a full set of records
pub mod aggregate;
/// Concurrent, fail-open reads from the store
pub mod fetch;
/// Free-text search over record lists
pub mod filter;
/// Raw store rows to render-cycle snapshots
pub mod normalize;
/// Payment screen breakdown and status filter
pub mod payments;
/// Per-person payment standing and activity
pub mod people;
/// Platform integration summary and school filter
pub mod platforms;
/// School status counts and per-school headcounts
pub mod schools;
