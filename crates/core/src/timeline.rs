//! Progress timelines for complaints and fee submissions.
//!
//! A timeline is an ordered list of display stages derived purely from the
//! current status and timestamps. There are no error conditions: a missing
//! timestamp simply renders without a date.

use serde::{Deserialize, Serialize};

use crate::complaint::{ComplaintProgress, ComplaintStatus};
use crate::fee::{FeeStatus, FeeSubmission, StudentFeeStatus};
use crate::types::Timestamp;

pub const STAGE_REGISTERED: &str = "Registered";
pub const STAGE_UNDER_REVIEW: &str = "Under Review";
pub const STAGE_AWAITING_CONFIRMATION: &str = "Awaiting Confirmation";
pub const STAGE_RESOLVED: &str = "Resolved";
pub const STAGE_REJECTED: &str = "Rejected";
pub const STAGE_NOT_SUBMITTED: &str = "Not Submitted";
pub const STAGE_SUBMITTED: &str = "Submitted";
pub const STAGE_APPROVED: &str = "Approved";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Completed,
    Current,
    Pending,
    Rejected,
}

/// One step of a progress timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStage {
    pub label: String,
    pub state: StageState,
    pub timestamp: Option<Timestamp>,
}

impl TimelineStage {
    fn new(label: &str, state: StageState, timestamp: Option<Timestamp>) -> Self {
        Self {
            label: label.to_string(),
            state,
            timestamp,
        }
    }
}

/// Derive the stages for a complaint.
///
/// Rejected complaints stop after the second stage.
pub fn complaint_timeline(progress: &ComplaintProgress) -> Vec<TimelineStage> {
    use StageState::*;

    let mut stages = vec![TimelineStage::new(
        STAGE_REGISTERED,
        Completed,
        Some(progress.created_at),
    )];

    match progress.status {
        ComplaintStatus::Rejected => {
            stages.push(TimelineStage::new(
                STAGE_REJECTED,
                Rejected,
                Some(progress.updated_at),
            ));
        }
        ComplaintStatus::Pending => {
            stages.push(TimelineStage::new(STAGE_UNDER_REVIEW, Current, None));
            stages.push(TimelineStage::new(STAGE_AWAITING_CONFIRMATION, Pending, None));
            stages.push(TimelineStage::new(STAGE_RESOLVED, Pending, None));
        }
        ComplaintStatus::ToBeConfirmed => {
            stages.push(TimelineStage::new(STAGE_UNDER_REVIEW, Completed, None));
            stages.push(TimelineStage::new(
                STAGE_AWAITING_CONFIRMATION,
                Current,
                Some(progress.updated_at),
            ));
            stages.push(TimelineStage::new(STAGE_RESOLVED, Pending, None));
        }
        ComplaintStatus::Resolved => {
            stages.push(TimelineStage::new(STAGE_UNDER_REVIEW, Completed, None));
            stages.push(TimelineStage::new(
                STAGE_AWAITING_CONFIRMATION,
                Completed,
                progress.student_verified_at,
            ));
            stages.push(TimelineStage::new(
                STAGE_RESOLVED,
                Completed,
                progress.resolved_at,
            ));
        }
    }

    stages
}

/// Derive the stages for one fee submission.
pub fn fee_timeline(fee: &FeeSubmission) -> Vec<TimelineStage> {
    use StageState::*;

    match fee.status {
        FeeStatus::DocumentNotSubmitted => vec![
            TimelineStage::new(STAGE_NOT_SUBMITTED, Current, None),
            TimelineStage::new(STAGE_UNDER_REVIEW, Pending, None),
            TimelineStage::new(STAGE_APPROVED, Pending, None),
        ],
        FeeStatus::Pending => vec![
            TimelineStage::new(STAGE_SUBMITTED, Completed, fee.submitted_at),
            TimelineStage::new(STAGE_UNDER_REVIEW, Current, fee.submitted_at),
            TimelineStage::new(STAGE_APPROVED, Pending, None),
        ],
        FeeStatus::Approved => vec![
            TimelineStage::new(STAGE_SUBMITTED, Completed, fee.submitted_at),
            TimelineStage::new(STAGE_UNDER_REVIEW, Completed, fee.submitted_at),
            TimelineStage::new(STAGE_APPROVED, Completed, fee.updated_at),
        ],
        FeeStatus::Rejected => vec![
            TimelineStage::new(STAGE_SUBMITTED, Completed, fee.submitted_at),
            TimelineStage::new(STAGE_UNDER_REVIEW, Completed, fee.submitted_at),
            TimelineStage::new(STAGE_REJECTED, Rejected, fee.updated_at),
        ],
    }
}

/// Independent timelines for both fee types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTimelines {
    pub hostel_fee: Vec<TimelineStage>,
    pub mess_fee: Vec<TimelineStage>,
}

pub fn fee_timelines(status: &StudentFeeStatus) -> FeeTimelines {
    FeeTimelines {
        hostel_fee: fee_timeline(&status.hostel_fee),
        mess_fee: fee_timeline(&status.mess_fee),
    }
}
