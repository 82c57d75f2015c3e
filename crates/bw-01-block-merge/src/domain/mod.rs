//! Domain module for Block Merge
//!
//! Contains the capability table, block switching and merge resolution.

pub mod errors;
pub mod merge;
pub mod registry;
pub mod switch;
