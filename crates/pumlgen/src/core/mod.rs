//! Core infrastructure shared by the UML model and the declaration feed
//!
//! Errors, configuration, logging and the indenting writer sink live here; the
//! model itself is in [`crate::uml`].

mod config;
mod error;
pub mod logging;
mod writer;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use writer::*;
