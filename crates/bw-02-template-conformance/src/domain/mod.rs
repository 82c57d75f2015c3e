//! Domain module for Template Conformance

pub mod matcher;
pub mod synchronize;

#[cfg(test)]
pub(crate) mod strategies;
