//! Gate transit log models.

use hostelia_core::transit::TransitDirection;
use hostelia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `transit_entries` table joined with the student's name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitEntry {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub hostel: String,
    #[sqlx(try_from = "String")]
    pub direction: TransitDirection,
    pub purpose: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /transit`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransitRequest {
    pub direction: TransitDirection,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub purpose: String,
}

#[derive(Debug, Clone)]
pub struct CreateTransit {
    pub student_id: DbId,
    pub hostel: String,
    pub direction: TransitDirection,
    pub purpose: String,
}
