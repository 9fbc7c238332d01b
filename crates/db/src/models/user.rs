//! User entity model and DTOs.

use hostelia_core::roles::Role;
use hostelia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub hostel: Option<String>,
    pub room_no: Option<String>,
    pub year: Option<i16>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub hostel: Option<String>,
    pub room_no: Option<String>,
    pub year: Option<i16>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            hostel: u.hostel,
            room_no: u.room_no,
            year: u.year,
            created_at: u.created_at,
        }
    }
}

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 80, message = "must be 2-80 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub password: String,
    pub role: Role,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub hostel: Option<String>,
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub room_no: Option<String>,
    #[validate(range(min = 1, max = 6, message = "must be between 1 and 6"))]
    pub year: Option<i16>,
}

/// DTO for inserting a user once the password has been hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub hostel: Option<String>,
    pub room_no: Option<String>,
    pub year: Option<i16>,
}
