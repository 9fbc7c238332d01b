//! Fee submission rows and DTOs.

use hostelia_core::fee::{FeeStatus, FeeSubmission, FeeType, StudentFeeStatus};
use hostelia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `fee_submissions` table.
#[derive(Debug, Clone, FromRow)]
pub struct FeeRow {
    pub id: DbId,
    pub student_id: DbId,
    #[sqlx(try_from = "String")]
    pub fee_type: FeeType,
    #[sqlx(try_from = "String")]
    pub status: FeeStatus,
    pub document_url: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
}

impl FeeRow {
    pub fn submission(&self) -> FeeSubmission {
        FeeSubmission {
            status: self.status,
            document_url: self.document_url.clone(),
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
            rejection_reason: self.rejection_reason.clone(),
        }
    }
}

/// One student joined with one of their fee rows (or none).
///
/// Produced by a `LEFT JOIN` so students without any rows still appear.
#[derive(Debug, Clone, FromRow)]
pub struct StudentFeeJoinRow {
    pub student_id: DbId,
    pub name: String,
    pub email: String,
    pub hostel: Option<String>,
    pub room_no: Option<String>,
    pub fee_type: Option<String>,
    pub status: Option<String>,
    pub document_url: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
}

/// A student with both fee submissions, for staff review screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeeRecord {
    pub student_id: DbId,
    pub name: String,
    pub email: String,
    pub hostel: Option<String>,
    pub room_no: Option<String>,
    pub fees: StudentFeeStatus,
}

/// Fold joined rows (ordered by student) into one record per student.
///
/// Rows with an unknown fee type or status are skipped; the table's check
/// constraints make that unreachable in practice.
pub fn group_student_fees(rows: Vec<StudentFeeJoinRow>) -> Vec<StudentFeeRecord> {
    let mut records: Vec<StudentFeeRecord> = Vec::new();
    for row in rows {
        let submission = match (row.fee_type.as_deref(), row.status.as_deref()) {
            (Some(t), Some(s)) => match (t.parse::<FeeType>(), s.parse::<FeeStatus>()) {
                (Ok(t), Ok(s)) => Some((
                    t,
                    FeeSubmission {
                        status: s,
                        document_url: row.document_url.clone(),
                        submitted_at: row.submitted_at,
                        updated_at: row.updated_at,
                        rejection_reason: row.rejection_reason.clone(),
                    },
                )),
                _ => None,
            },
            _ => None,
        };

        let same_student = records
            .last()
            .is_some_and(|r| r.student_id == row.student_id);
        if !same_student {
            records.push(StudentFeeRecord {
                student_id: row.student_id,
                name: row.name,
                email: row.email,
                hostel: row.hostel,
                room_no: row.room_no,
                fees: StudentFeeStatus::default(),
            });
        }
        if let (Some((fee_type, submission)), Some(record)) = (submission, records.last_mut()) {
            *record.fees.get_mut(fee_type) = submission;
        }
    }
    records
}

/// Request body for `POST /fee/{fee_type}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeeRequest {
    #[validate(url(message = "must be a valid URL"))]
    pub document_url: String,
}

/// Request body for `POST /fee/students/{id}/{fee_type}/reject`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectFeeRequest {
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(student_id: DbId, fee_type: Option<&str>, status: Option<&str>) -> StudentFeeJoinRow {
        let submitted = status.is_some_and(|s| s != "documentNotSubmitted");
        StudentFeeJoinRow {
            student_id,
            name: format!("Student {student_id}"),
            email: format!("s{student_id}@uni.edu"),
            hostel: Some("BH-1".into()),
            room_no: Some("101".into()),
            fee_type: fee_type.map(str::to_string),
            status: status.map(str::to_string),
            document_url: submitted.then(|| "https://cdn.example.com/r.pdf".to_string()),
            submitted_at: submitted.then(|| Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            updated_at: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn groups_rows_by_student() {
        let records = group_student_fees(vec![
            row(1, Some("hostel"), Some("pending")),
            row(1, Some("mess"), Some("documentNotSubmitted")),
            row(2, None, None),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fees.hostel_fee.status, FeeStatus::Pending);
        assert_eq!(records[0].fees.mess_fee.status, FeeStatus::DocumentNotSubmitted);
        assert_eq!(records[1].student_id, 2);
        assert_eq!(records[1].fees, StudentFeeStatus::default());
    }

    #[test]
    fn unknown_values_fall_back_to_default() {
        let records = group_student_fees(vec![row(3, Some("laundry"), Some("pending"))]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fees, StudentFeeStatus::default());
    }
}
