//! Integration flows.

pub mod fixtures;

mod dispatch;
mod editing;
mod notices;
mod persistence;
