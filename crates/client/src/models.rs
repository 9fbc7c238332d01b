//! Wire types for API responses.
//!
//! These mirror the JSON the server emits (camelCase) and reuse the core
//! domain types wherever the server serializes one directly.

use std::collections::BTreeMap;

use hostelia_core::complaint::{ComplaintCategory, ComplaintProgress, ComplaintStatus, StudentStatus};
use hostelia_core::dashboard::{ComplaintSummary, FeedbackSummary};
use hostelia_core::fee::{FeeSummary, StudentFeeStatus};
use hostelia_core::mess::{DayOfWeek, MealType};
use hostelia_core::roles::Role;
use hostelia_core::timeline::TimelineStage;
use hostelia_core::transit::TransitDirection;
use hostelia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A user account as returned by `/auth/me` and the user lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub hostel: Option<String>,
    pub room_no: Option<String>,
    pub year: Option<i16>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintItem {
    pub id: DbId,
    pub student_id: DbId,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub hostel: String,
    pub room_no: String,
    pub image_url: Option<String>,
    pub status: ComplaintStatus,
    pub student_status: StudentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub student_verified_at: Option<Timestamp>,
}

impl ComplaintItem {
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

/// Body for `POST /complaints`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintTimeline {
    pub complaint_id: DbId,
    pub status: ComplaintStatus,
    pub stages: Vec<TimelineStage>,
}

/// One student's fee submissions, as staff see them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeeRecord {
    pub student_id: DbId,
    pub name: String,
    pub email: String,
    pub hostel: Option<String>,
    pub room_no: Option<String>,
    pub fees: StudentFeeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub message: String,
    pub hostel: Option<String>,
    pub created_by: DbId,
    pub author_name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: DbId,
    pub hostel: String,
    pub day: DayOfWeek,
    pub meal: MealType,
    pub items: Vec<String>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeeklyMenu {
    pub hostel: String,
    pub entries: Vec<MenuEntry>,
}

impl WeeklyMenu {
    /// Items served for `meal` on `day`, empty when the slot is unset.
    pub fn items(&self, day: DayOfWeek, meal: MealType) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.day == day && e.meal == meal)
            .map(|e| e.items.as_slice())
            .unwrap_or(&[])
    }

    /// Entries grouped by day, each day's meals in serving order.
    pub fn by_day(&self) -> BTreeMap<DayOfWeek, Vec<&MenuEntry>> {
        let mut days: BTreeMap<DayOfWeek, Vec<&MenuEntry>> = BTreeMap::new();
        for entry in &self.entries {
            days.entry(entry.day).or_default().push(entry);
        }
        for meals in days.values_mut() {
            meals.sort_by_key(|e| e.meal);
        }
        days
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub hostel: String,
    pub meal: MealType,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitLog {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub hostel: String,
    pub direction: TransitDirection,
    pub purpose: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub complaints: ComplaintSummary,
    pub fees: StudentFeeStatus,
    pub announcements: Vec<Announcement>,
    pub is_outside: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDashboard {
    pub hostel: Option<String>,
    pub total_students: i64,
    pub students_outside: i64,
    pub complaints: ComplaintSummary,
    pub average_resolution_time: String,
    pub fees: FeeSummary,
    pub feedback: FeedbackSummary,
    pub announcements: Vec<Announcement>,
}

/// What `GET /dashboard` returns, tagged with `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardView {
    Student(StudentDashboard),
    Staff(StaffDashboard),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complaint_item_decodes_server_shape() {
        let item: ComplaintItem = serde_json::from_value(json!({
            "id": 7,
            "studentId": 5,
            "title": "Tap leaking",
            "description": "The bathroom tap leaks all night",
            "category": "Plumbing",
            "hostel": "BH-1",
            "roomNo": "101",
            "imageUrl": null,
            "status": "ToBeConfirmed",
            "studentStatus": "NotResolved",
            "createdAt": "2025-02-10T12:00:00Z",
            "updatedAt": "2025-02-11T09:00:00Z",
            "resolvedAt": "2025-02-11T09:00:00Z",
            "studentVerifiedAt": null
        }))
        .unwrap();

        let progress = item.progress();
        assert_eq!(progress.status, ComplaintStatus::ToBeConfirmed);
        assert!(progress.resolved_at.is_some());
        assert!(!progress.is_terminal());
    }

    #[test]
    fn dashboard_is_tagged() {
        let view: DashboardView = serde_json::from_value(json!({
            "kind": "student",
            "complaints": {
                "total": 0, "pending": 0, "toBeConfirmed": 0,
                "resolved": 0, "rejected": 0, "averageResolutionHours": null
            },
            "fees": StudentFeeStatus::default(),
            "announcements": [],
            "isOutside": true
        }))
        .unwrap();
        match view {
            DashboardView::Student(s) => assert!(s.is_outside),
            DashboardView::Staff(_) => panic!("expected student dashboard"),
        }
    }

    #[test]
    fn weekly_menu_lookup() {
        let entry = |day, meal, item: &str| MenuEntry {
            id: 1,
            hostel: "BH-1".into(),
            day,
            meal,
            items: vec![item.to_string()],
            updated_at: chrono::Utc::now(),
        };
        let menu = WeeklyMenu {
            hostel: "BH-1".into(),
            entries: vec![
                entry(DayOfWeek::Monday, MealType::Dinner, "Dal"),
                entry(DayOfWeek::Monday, MealType::Breakfast, "Poha"),
            ],
        };
        assert_eq!(menu.items(DayOfWeek::Monday, MealType::Breakfast), ["Poha"]);
        assert!(menu.items(DayOfWeek::Tuesday, MealType::Lunch).is_empty());

        let days = menu.by_day();
        let monday: Vec<MealType> = days[&DayOfWeek::Monday].iter().map(|e| e.meal).collect();
        assert_eq!(monday, vec![MealType::Breakfast, MealType::Dinner]);
    }
}
