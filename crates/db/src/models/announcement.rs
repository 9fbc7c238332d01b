//! Announcement entity model and DTOs.

use hostelia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `announcements` table joined with the author's name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub message: String,
    /// `None` for announcements visible in every hostel.
    pub hostel: Option<String>,
    pub created_by: DbId,
    pub author_name: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /announcement`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 3, max = 120, message = "must be 3-120 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "must be 1-2000 characters"))]
    pub message: String,
    /// Admins may target one hostel or leave this empty for all hostels.
    /// Wardens always post to their own hostel.
    pub hostel: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateAnnouncement {
    pub title: String,
    pub message: String,
    pub hostel: Option<String>,
    pub created_by: DbId,
}
