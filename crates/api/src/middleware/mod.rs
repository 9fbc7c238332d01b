//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireStudent`] -- requires the `student` role.
//! - [`rbac::RequireStaff`] -- requires `warden` or `admin`.
//! - [`rbac::RequireAdmin`] -- requires `admin`.

pub mod auth;
pub mod rbac;
