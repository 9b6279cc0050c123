//! JSON-file and object-store persistence for the gallery and form submissions.
//!
//! - [`ObjectStore`] -- remote blob storage seam; [`VercelBlobStore`] is the
//!   production implementation.
//! - [`local`] -- whole-file JSON reads and atomic rewrites.
//! - [`GalleryStore`] -- `gallery.json` accessor (remote first, local fallback).
//! - [`SubmissionStore`] -- `submissions.json` accessor.
//!
//! Both accessors serialize their read-modify-write cycles behind a
//! per-store mutex, so concurrent requests in one process never lose an
//! update. Separate processes sharing the same file still race.

pub mod blob;
pub mod error;
pub mod gallery;
pub mod local;
pub mod submissions;

pub use blob::{BlobConfig, BlobEntry, ObjectStore, VercelBlobStore};
pub use error::StoreError;
pub use gallery::{DeleteOutcome, GalleryDiagnostics, GalleryStore, Persisted, UploadOutcome};
pub use submissions::SubmissionStore;
