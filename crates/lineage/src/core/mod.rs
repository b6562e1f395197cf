//! Core abstractions shared by the layout engine and its callers
//!
//! Input records, the snapshot container, configuration, errors, logging and
//! the layout trait live here; the engine itself lives in [`crate::tree`].

mod config;
mod database;
mod error;
mod layout;
pub mod logging;
mod types;

pub use config::*;
pub use database::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use types::*;
