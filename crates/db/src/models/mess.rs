//! Mess menu and feedback models.

use hostelia_core::mess::{DayOfWeek, MealType};
use hostelia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One meal slot of a hostel's weekly menu.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessMenuEntry {
    pub id: DbId,
    pub hostel: String,
    #[sqlx(try_from = "String")]
    pub day: DayOfWeek,
    #[sqlx(try_from = "String")]
    pub meal: MealType,
    pub items: Vec<String>,
    pub updated_at: Timestamp,
}

/// Request body for `PUT /mess/menu`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMenuRequest {
    /// Only admins may set this; wardens edit their own hostel.
    pub hostel: Option<String>,
    pub day: DayOfWeek,
    pub meal: MealType,
    pub items: Vec<String>,
}

/// A row from the `mess_feedback` table joined with the student's name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessFeedback {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub hostel: String,
    #[sqlx(try_from = "String")]
    pub meal: MealType,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for `POST /mess/feedback`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub meal: MealType,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub student_id: DbId,
    pub hostel: String,
    pub meal: MealType,
    pub rating: i16,
    pub comment: Option<String>,
}

/// Meal and rating only, for aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct RatingRow {
    #[sqlx(try_from = "String")]
    pub meal: MealType,
    pub rating: i16,
}
