//! persona-order
//!
//! Deterministic display ordering for assistant personas, the visibility and
//! ownership rules applied when listing them, and the reorder flow that
//! persists explicit priorities through a persona store.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod persona;
pub mod version;

pub use error::{Error, ErrorCode, Result};
