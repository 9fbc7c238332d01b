//! Complaint workflow model.
//!
//! A complaint moves `Pending -> ToBeConfirmed -> Resolved`, or is rejected
//! by staff while still pending. The student who raised it confirms or
//! disputes the fix; a dispute sends it back to `Pending`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum length of a complaint title.
pub const MAX_TITLE_LEN: u64 = 100;

/// Maximum length of a complaint description.
pub const MAX_DESCRIPTION_LEN: u64 = 1000;

text_enum! {
    /// Staff-facing lifecycle status.
    pub enum ComplaintStatus {
        Pending => "Pending",
        ToBeConfirmed => "ToBeConfirmed",
        Resolved => "Resolved",
        Rejected => "Rejected",
    }
}

text_enum! {
    /// The student's verdict on a fix.
    pub enum StudentStatus {
        NotResolved => "NotResolved",
        Resolved => "Resolved",
        Rejected => "Rejected",
    }
}

text_enum! {
    pub enum ComplaintCategory {
        Electrical => "Electrical",
        Plumbing => "Plumbing",
        Furniture => "Furniture",
        Cleaning => "Cleaning",
        Internet => "Internet",
        Mess => "Mess",
        Other => "Other",
    }
}

/// A requested change to a complaint's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintAction {
    /// Staff reports the issue fixed and asks the student to confirm.
    MarkResolved,
    /// Staff rejects the complaint outright.
    Reject,
    /// The student accepts the fix.
    StudentConfirm,
    /// The student reports the issue is not fixed.
    StudentDispute,
}

impl ComplaintAction {
    /// Whether the action is performed by a warden or admin (as opposed to
    /// the student who raised the complaint).
    pub fn is_staff_action(&self) -> bool {
        matches!(self, ComplaintAction::MarkResolved | ComplaintAction::Reject)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComplaintAction::MarkResolved => "mark_resolved",
            ComplaintAction::Reject => "reject",
            ComplaintAction::StudentConfirm => "confirm",
            ComplaintAction::StudentDispute => "dispute",
        }
    }

    /// The status a complaint must currently have for this action to apply.
    pub fn required_status(&self) -> ComplaintStatus {
        match self {
            ComplaintAction::MarkResolved | ComplaintAction::Reject => ComplaintStatus::Pending,
            ComplaintAction::StudentConfirm | ComplaintAction::StudentDispute => {
                ComplaintStatus::ToBeConfirmed
            }
        }
    }
}

/// The status-bearing part of a complaint: everything the workflow and the
/// progress timeline need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintProgress {
    pub status: ComplaintStatus,
    pub student_status: StudentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub student_verified_at: Option<Timestamp>,
}

impl ComplaintProgress {
    /// A freshly registered complaint.
    pub fn registered(now: Timestamp) -> Self {
        Self {
            status: ComplaintStatus::Pending,
            student_status: StudentStatus::NotResolved,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            student_verified_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            ComplaintStatus::Resolved | ComplaintStatus::Rejected
        )
    }

    /// The student's verdict, when there is one to show.
    ///
    /// `None` before staff have asked for confirmation, and on rejected
    /// complaints. A pending complaint carries a verdict only when the
    /// student disputed an earlier fix.
    pub fn student_verdict(&self) -> Option<StudentStatus> {
        match (self.status, self.student_status) {
            (ComplaintStatus::ToBeConfirmed | ComplaintStatus::Resolved, s) => Some(s),
            (ComplaintStatus::Pending, StudentStatus::Rejected) => Some(StudentStatus::Rejected),
            _ => None,
        }
    }

    /// Apply `action` at time `now`, returning the new progress.
    ///
    /// Fails with [`CoreError::Conflict`] when the action is not valid from
    /// the current status.
    pub fn apply(&self, action: ComplaintAction, now: Timestamp) -> Result<Self, CoreError> {
        if self.status != action.required_status() {
            return Err(CoreError::Conflict(format!(
                "Cannot {} a complaint with status {}",
                action.name(),
                self.status
            )));
        }

        let mut next = self.clone();
        next.updated_at = now;
        match action {
            ComplaintAction::MarkResolved => {
                next.status = ComplaintStatus::ToBeConfirmed;
                next.student_status = StudentStatus::NotResolved;
            }
            ComplaintAction::Reject => {
                next.status = ComplaintStatus::Rejected;
            }
            ComplaintAction::StudentConfirm => {
                next.status = ComplaintStatus::Resolved;
                next.student_status = StudentStatus::Resolved;
                next.resolved_at = Some(now);
                next.student_verified_at = Some(now);
            }
            ComplaintAction::StudentDispute => {
                next.status = ComplaintStatus::Pending;
                next.student_status = StudentStatus::Rejected;
                next.student_verified_at = Some(now);
            }
        }
        Ok(next)
    }

    /// Time from registration to resolution, in hours.
    pub fn resolution_hours(&self) -> Option<f64> {
        let resolved_at = self.resolved_at?;
        if self.status != ComplaintStatus::Resolved {
            return None;
        }
        let secs = (resolved_at - self.created_at).num_seconds();
        Some(secs.max(0) as f64 / 3600.0)
    }
}
