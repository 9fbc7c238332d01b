//! Hostelia domain core.
//!
//! Pure logic shared by the API server and the client: status workflow
//! models, progress timelines, dashboard aggregation, listing filters and
//! pagination. This crate has no database or HTTP dependencies; all data
//! is passed in by the caller.

#[macro_use]
pub mod types;

pub mod complaint;
pub mod dashboard;
pub mod error;
pub mod fee;
pub mod listing;
pub mod media;
pub mod mess;
pub mod pagination;
pub mod roles;
pub mod timeline;
pub mod transit;
