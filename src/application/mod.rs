//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait
//! and give HTTP handlers and the admin CLI a store-agnostic API.
//!
//! - [`services::link_service::LinkService`] - Link registry (create, list, get, delete)
//! - [`services::click_service::ClickService`] - Redirect resolution and click tracking

pub mod services;
