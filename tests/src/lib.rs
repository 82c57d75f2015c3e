//! # Blockwright Test Suite
//!
//! Cross-subsystem flows driven through the real dispatcher, the default
//! effect table and the in-memory document container.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Shared documents and runtimes
//!     ├── editing.rs      # Merge, removal recovery, templates
//!     ├── notices.rs      # Announcements
//!     ├── persistence.rs  # Asynchronous collaborator round trips
//!     └── dispatch.rs     # Ordering, chain bound, precondition policy
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bw-tests
//! cargo test -p bw-tests integration::persistence::
//! ```

#![allow(dead_code)]

pub mod integration;
