pub mod auth;
pub mod forms;
pub mod gallery;
pub mod leads;
