//! Selection recovery domain logic

pub mod recovery;
