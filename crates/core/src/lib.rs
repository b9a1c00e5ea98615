//! Domain primitives shared by the store layer and the HTTP API.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod patch;
pub mod types;
pub mod validation;
