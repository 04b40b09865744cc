//! Infrastructure layer for external integrations.
//!
//! - [`cache`] - Redirect cache (Redis and no-op implementations)
//! - [`persistence`] - Link store implementations (PostgreSQL and in-memory)

pub mod cache;
pub mod persistence;
