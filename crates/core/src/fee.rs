//! Fee submission workflow model.
//!
//! Every student has one submission per [`FeeType`]. A submission moves
//! `documentNotSubmitted -> pending -> approved | rejected`; a rejected
//! submission may be resubmitted.
//!
//! Invariants (checked by [`FeeSubmission::check_invariants`]):
//! - `document_url` and `submitted_at` are present iff status is not
//!   `documentNotSubmitted`;
//! - `rejection_reason` is present iff status is `rejected`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media;
use crate::types::Timestamp;

/// Maximum length of a rejection reason.
pub const MAX_REJECTION_REASON_LEN: usize = 500;

text_enum! {
    pub enum FeeStatus {
        DocumentNotSubmitted => "documentNotSubmitted",
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

text_enum! {
    pub enum FeeType {
        Hostel => "hostel",
        Mess => "mess",
    }
}

/// One student's submission for one fee type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSubmission {
    pub status: FeeStatus,
    pub document_url: Option<String>,
    pub submitted_at: Option<Timestamp>,
    /// Time of the last review decision.
    pub updated_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
}

impl Default for FeeSubmission {
    fn default() -> Self {
        Self::not_submitted()
    }
}

impl FeeSubmission {
    pub fn not_submitted() -> Self {
        Self {
            status: FeeStatus::DocumentNotSubmitted,
            document_url: None,
            submitted_at: None,
            updated_at: None,
            rejection_reason: None,
        }
    }

    pub fn check_invariants(&self) -> Result<(), CoreError> {
        let submitted = self.status != FeeStatus::DocumentNotSubmitted;
        if submitted != self.document_url.is_some() {
            return Err(CoreError::Internal(format!(
                "Fee submission with status {} has inconsistent document URL",
                self.status
            )));
        }
        if submitted != self.submitted_at.is_some() {
            return Err(CoreError::Internal(format!(
                "Fee submission with status {} has inconsistent submission time",
                self.status
            )));
        }
        if (self.status == FeeStatus::Rejected) != self.rejection_reason.is_some() {
            return Err(CoreError::Internal(format!(
                "Fee submission with status {} has inconsistent rejection reason",
                self.status
            )));
        }
        Ok(())
    }

    /// Upload a (re)submission. Allowed from `documentNotSubmitted` and
    /// `rejected`.
    pub fn submit(&self, document_url: &str, now: Timestamp) -> Result<Self, CoreError> {
        match self.status {
            FeeStatus::DocumentNotSubmitted | FeeStatus::Rejected => {}
            FeeStatus::Pending => {
                return Err(CoreError::Conflict(
                    "A document is already awaiting review".into(),
                ))
            }
            FeeStatus::Approved => {
                return Err(CoreError::Conflict("This fee is already approved".into()))
            }
        }
        media::validate_document_url(document_url)?;

        Ok(Self {
            status: FeeStatus::Pending,
            document_url: Some(document_url.to_string()),
            submitted_at: Some(now),
            updated_at: None,
            rejection_reason: None,
        })
    }

    /// Approve a pending submission.
    pub fn approve(&self, now: Timestamp) -> Result<Self, CoreError> {
        self.ensure_pending("approve")?;
        Ok(Self {
            status: FeeStatus::Approved,
            updated_at: Some(now),
            rejection_reason: None,
            ..self.clone()
        })
    }

    /// Reject a pending submission with a reason shown to the student.
    pub fn reject(&self, reason: &str, now: Timestamp) -> Result<Self, CoreError> {
        self.ensure_pending("reject")?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(CoreError::Validation(
                "A rejection reason is required".into(),
            ));
        }
        if reason.chars().count() > MAX_REJECTION_REASON_LEN {
            return Err(CoreError::Validation(format!(
                "Rejection reason must be at most {MAX_REJECTION_REASON_LEN} characters"
            )));
        }
        Ok(Self {
            status: FeeStatus::Rejected,
            updated_at: Some(now),
            rejection_reason: Some(reason.to_string()),
            ..self.clone()
        })
    }

    fn ensure_pending(&self, verb: &str) -> Result<(), CoreError> {
        if self.status != FeeStatus::Pending {
            return Err(CoreError::Conflict(format!(
                "Cannot {verb} a fee submission with status {}",
                self.status
            )));
        }
        Ok(())
    }
}

/// A student's hostel and mess submissions.
///
/// Always carries both fee types; a type with no stored row is
/// `documentNotSubmitted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeeStatus {
    pub hostel_fee: FeeSubmission,
    pub mess_fee: FeeSubmission,
}

impl StudentFeeStatus {
    /// Build from whatever rows exist for the student.
    pub fn from_submissions(rows: impl IntoIterator<Item = (FeeType, FeeSubmission)>) -> Self {
        let mut status = Self::default();
        for (fee_type, submission) in rows {
            *status.get_mut(fee_type) = submission;
        }
        status
    }

    pub fn get(&self, fee_type: FeeType) -> &FeeSubmission {
        match fee_type {
            FeeType::Hostel => &self.hostel_fee,
            FeeType::Mess => &self.mess_fee,
        }
    }

    pub fn get_mut(&mut self, fee_type: FeeType) -> &mut FeeSubmission {
        match fee_type {
            FeeType::Hostel => &mut self.hostel_fee,
            FeeType::Mess => &mut self.mess_fee,
        }
    }
}

/// Per-status counts for one fee type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCounts {
    pub document_not_submitted: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl FeeCounts {
    pub fn record(&mut self, status: FeeStatus) {
        match status {
            FeeStatus::DocumentNotSubmitted => self.document_not_submitted += 1,
            FeeStatus::Pending => self.pending += 1,
            FeeStatus::Approved => self.approved += 1,
            FeeStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn total(&self) -> i64 {
        self.document_not_submitted + self.pending + self.approved + self.rejected
    }
}

/// Staff-facing aggregate over many students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub total_students: i64,
    pub hostel_fee: FeeCounts,
    pub mess_fee: FeeCounts,
}

impl FeeSummary {
    pub fn counts(&self, fee_type: FeeType) -> &FeeCounts {
        match fee_type {
            FeeType::Hostel => &self.hostel_fee,
            FeeType::Mess => &self.mess_fee,
        }
    }
}

/// What `GET /fee` returns: a student's own submissions, or the staff
/// summary. Tagged with `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeOverview {
    Student(StudentFeeStatus),
    Summary(FeeSummary),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    const DOC: &str = "https://res.cloudinary.com/demo/raw/upload/v1/hostel-receipt.pdf";

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 7, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn default_is_not_submitted_and_consistent() {
        let fee = FeeSubmission::default();
        assert_eq!(fee.status, FeeStatus::DocumentNotSubmitted);
        assert!(fee.check_invariants().is_ok());
    }

    #[test]
    fn submit_then_approve() {
        let fee = FeeSubmission::not_submitted().submit(DOC, t0()).unwrap();
        assert_eq!(fee.status, FeeStatus::Pending);
        assert_eq!(fee.document_url.as_deref(), Some(DOC));
        assert_eq!(fee.submitted_at, Some(t0()));
        assert!(fee.check_invariants().is_ok());

        let t1 = t0() + Duration::days(1);
        let fee = fee.approve(t1).unwrap();
        assert_eq!(fee.status, FeeStatus::Approved);
        assert_eq!(fee.updated_at, Some(t1));
        assert!(fee.check_invariants().is_ok());
    }

    #[test]
    fn reject_then_resubmit_clears_reason() {
        let fee = FeeSubmission::not_submitted()
            .submit(DOC, t0())
            .unwrap()
            .reject("  Amount does not match  ", t0())
            .unwrap();
        assert_eq!(fee.status, FeeStatus::Rejected);
        assert_eq!(fee.rejection_reason.as_deref(), Some("Amount does not match"));
        assert!(fee.check_invariants().is_ok());

        let again = fee.submit(DOC, t0() + Duration::hours(4)).unwrap();
        assert_eq!(again.status, FeeStatus::Pending);
        assert!(again.rejection_reason.is_none());
        assert!(again.updated_at.is_none());
        assert!(again.check_invariants().is_ok());
    }

    #[test]
    fn cannot_resubmit_while_pending_or_approved() {
        let pending = FeeSubmission::not_submitted().submit(DOC, t0()).unwrap();
        assert_matches!(pending.submit(DOC, t0()), Err(CoreError::Conflict(_)));

        let approved = pending.approve(t0()).unwrap();
        assert_matches!(approved.submit(DOC, t0()), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn cannot_review_without_document() {
        let fee = FeeSubmission::not_submitted();
        assert_matches!(fee.approve(t0()), Err(CoreError::Conflict(_)));
        assert_matches!(fee.reject("no", t0()), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn rejection_requires_reason() {
        let pending = FeeSubmission::not_submitted().submit(DOC, t0()).unwrap();
        assert_matches!(pending.reject("   ", t0()), Err(CoreError::Validation(_)));
        let long = "x".repeat(MAX_REJECTION_REASON_LEN + 1);
        assert_matches!(pending.reject(&long, t0()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn submit_rejects_non_document_url() {
        let result = FeeSubmission::not_submitted().submit("https://example.com/a.zip", t0());
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn invariant_violations_detected() {
        let mut fee = FeeSubmission::not_submitted();
        fee.document_url = Some(DOC.into());
        assert!(fee.check_invariants().is_err());

        let mut fee = FeeSubmission::not_submitted().submit(DOC, t0()).unwrap();
        fee.rejection_reason = Some("stale".into());
        assert!(fee.check_invariants().is_err());
    }

    #[test]
    fn student_status_defaults_missing_types() {
        let pending = FeeSubmission::not_submitted().submit(DOC, t0()).unwrap();
        let status = StudentFeeStatus::from_submissions([(FeeType::Mess, pending.clone())]);
        assert_eq!(status.get(FeeType::Mess), &pending);
        assert_eq!(
            status.get(FeeType::Hostel).status,
            FeeStatus::DocumentNotSubmitted
        );
    }

    #[test]
    fn counts_record_each_status() {
        let mut counts = FeeCounts::default();
        for s in FeeStatus::ALL {
            counts.record(*s);
        }
        counts.record(FeeStatus::Pending);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn overview_is_tagged_by_kind() {
        let student = FeeOverview::Student(StudentFeeStatus::default());
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["kind"], "student");
        assert_eq!(json["hostelFee"]["status"], "documentNotSubmitted");

        let summary = FeeOverview::Summary(FeeSummary::default());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "summary");
        assert_eq!(json["messFee"]["pending"], 0);

        let back: FeeOverview = serde_json::from_value(json).unwrap();
        assert_matches!(back, FeeOverview::Summary(_));
    }
}
