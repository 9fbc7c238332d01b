//! Typed client for the Hostelia REST API.
//!
//! [`api::HosteliaClient`] wraps the HTTP endpoints and keeps the bearer
//! session; [`store::AppStore`] holds the application state a front end
//! renders from, mutated only through [`store::Action`] values.

pub mod api;
pub mod envelope;
pub mod error;
pub mod models;
pub mod session;
pub mod store;

pub use api::HosteliaClient;
pub use error::ClientError;
pub use store::{Action, AppStore};
