//! # BW-01: Block Merge
//!
//! Resolves a "merge blocks" event into selection and replacement effects.
//!
//! ## Architecture
//!
//! - **Domain**: Capability table (`BlockTypeRegistry`), block switching,
//!   merge resolution
//! - **Library**: Core block types with their merge/transform capabilities
//! - **Handler**: `MergeBlocksHandler` registered on the dispatcher
//!
//! ## Outcomes
//!
//! | Receiving type | Donor type | Effects |
//! |----------------|-----------|---------|
//! | no merge capability | any | select receiving |
//! | mergeable | same type | select receiving at end, replace pair |
//! | mergeable | convertible | select receiving at end, replace pair (+ extra transformed blocks) |
//! | mergeable | not convertible | nothing |
//!
//! The receiving block's identity and position always win; the donor is
//! always discarded.

pub mod domain;
pub mod handler;
pub mod library;

pub use domain::errors::RegistryError;
pub use domain::merge::{resolve_merge, MergeOutcome};
pub use domain::registry::{BlockTypeDescriptor, BlockTypeRegistry, MergeFn, TransformFn};
pub use domain::switch::switch_to_block_type;
pub use handler::MergeBlocksHandler;
pub use library::core_block_types;
