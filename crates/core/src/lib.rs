//! Domain types and pure logic for the IOTWatch backend.
//!
//! Nothing in this crate performs I/O. The database and HTTP crates build on
//! these types so pagination math and error classification live in one place.

pub mod error;
pub mod page_window;
pub mod pagination;
pub mod types;
pub mod validation;
