//! Core domain entities.
//!
//! The service has a single entity, [`Link`]. Creation input is carried by
//! the separate [`NewLink`] struct so that store-assigned fields (`id`,
//! timestamps, counters) can never be supplied by callers.

pub mod link;

pub use link::{Link, NewLink};
