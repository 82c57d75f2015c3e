//! # BW-02: Template Conformance
//!
//! Validates a block list against the document template and, on request,
//! forces the block list to follow it.
//!
//! ## Conformance Predicate
//!
//! A block list conforms when there is no template, when the lock mode is
//! not `all`, or when the list structurally matches the template (type names
//! and nesting; attributes are ignored).
//!
//! ## Handlers
//!
//! | Event | Handler | Emits |
//! |-------|---------|-------|
//! | `ResetBlocks` | `ValidateBlocksToTemplateHandler` | `SetTemplateValidity` only if it changed |
//! | `CheckTemplateValidity` | `CheckTemplateValidityHandler` | `SetTemplateValidity` always |
//! | `SynchronizeTemplate` | `SynchronizeTemplateHandler` | `ResetBlocks`, `SetTemplateValidity(true)` |

pub mod domain;
pub mod handlers;

pub use domain::matcher::{blocks_match_template, conforms};
pub use domain::synchronize::synchronize_blocks_with_template;
pub use handlers::{
    CheckTemplateValidityHandler, SynchronizeTemplateHandler, ValidateBlocksToTemplateHandler,
};
