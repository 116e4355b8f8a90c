//! File output.

/// CSV export of recommendation and scenario tables.
pub mod export;
