//! # BW-03: Selection Recovery
//!
//! Moves the selection to a sensible neighbour after blocks are removed.
//!
//! The post-removal tree can no longer say what was next to a deleted block,
//! so the lookup runs against the most recent history snapshot, the state
//! committed just before the removal. That snapshot is only read, never
//! applied.
//!
//! ## Candidate
//!
//! | Removed block was | Candidate |
//! |-------------------|-----------|
//! | preceded by a sibling | that sibling |
//! | first child of a container | the container |
//! | first top-level block | none |
//!
//! With no candidate nothing is dispatched. The document container already
//! drops a selection that pointed at a removed block, so no explicit
//! empty selection event is emitted.

pub mod domain;
pub mod handler;

pub use domain::recovery::previous_block_candidate;
pub use handler::RemoveBlocksHandler;
