//! Complaint entity model and DTOs.

use hostelia_core::complaint::{
    ComplaintCategory, ComplaintProgress, ComplaintStatus, StudentStatus, MAX_DESCRIPTION_LEN,
    MAX_TITLE_LEN,
};
use hostelia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `complaints` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: DbId,
    pub student_id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub category: ComplaintCategory,
    pub hostel: String,
    pub room_no: String,
    pub image_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ComplaintStatus,
    #[sqlx(try_from = "String")]
    pub student_status: StudentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub student_verified_at: Option<Timestamp>,
}

impl Complaint {
    /// The workflow-relevant subset of this row.
    pub fn progress(&self) -> ComplaintProgress {
        ComplaintProgress {
            status: self.status,
            student_status: self.student_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            resolved_at: self.resolved_at,
            student_verified_at: self.student_verified_at,
        }
    }
}

/// Request body for `POST /complaints`.
///
/// Hostel and room come from the student's account, not the request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    #[validate(length(min = 3, max = MAX_TITLE_LEN, message = "must be 3-100 characters"))]
    pub title: String,
    #[validate(length(min = 10, max = MAX_DESCRIPTION_LEN, message = "must be 10-1000 characters"))]
    pub description: String,
    pub category: ComplaintCategory,
    pub image_url: Option<String>,
}

/// DTO for inserting a complaint.
#[derive(Debug, Clone)]
pub struct CreateComplaint {
    pub student_id: DbId,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub hostel: String,
    pub room_no: String,
    pub image_url: Option<String>,
}
