//! Admin authentication primitives.
//!
//! - [`credentials`] -- the single admin account configured in the environment.
//! - [`jwt`] -- HS256 token issue and verification.

pub mod credentials;
pub mod jwt;
