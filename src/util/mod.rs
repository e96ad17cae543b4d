//! Shared utilities.
//!
//! Helpers for recursive JSON merging and for reporting recoverable
//! warnings.

pub mod merge;
pub mod report;
