//! Request extractors that enforce access control.
//!
//! - [`auth::AdminUser`] -- requires a valid admin JWT Bearer token.

pub mod auth;
