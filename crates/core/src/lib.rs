//! Domain logic for the Life Savers site backend.
//!
//! Everything in this crate is pure: no I/O, no clocks except where a
//! timestamp is passed in. The HTTP layer (`lifesavers-api`) and the
//! delivery/storage crates build on these types.

pub mod error;
pub mod gallery;
pub mod lead;
pub mod submission;
pub mod types;
