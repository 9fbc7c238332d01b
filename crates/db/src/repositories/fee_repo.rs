//! Repository for the `fee_submissions` table.

use hostelia_core::fee::{FeeStatus, FeeSubmission, FeeType, StudentFeeStatus};
use hostelia_core::types::DbId;
use sqlx::PgPool;

use crate::models::fee::{group_student_fees, FeeRow, StudentFeeJoinRow, StudentFeeRecord};

const COLUMNS: &str = "\
    id, student_id, fee_type, status, document_url, submitted_at, updated_at, \
    rejection_reason";

pub struct FeeRepo;

impl FeeRepo {
    /// Create the `documentNotSubmitted` rows for both fee types if they
    /// do not exist yet.
    pub async fn ensure_rows(pool: &PgPool, student_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO fee_submissions (student_id, fee_type) \
             VALUES ($1, 'hostel'), ($1, 'mess') \
             ON CONFLICT (student_id, fee_type) DO NOTHING",
        )
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_rows(pool: &PgPool, student_id: DbId) -> Result<Vec<FeeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fee_submissions WHERE student_id = $1 ORDER BY fee_type"
        );
        sqlx::query_as::<_, FeeRow>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Both submissions for a student; missing rows read as
    /// `documentNotSubmitted`.
    pub async fn find_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<StudentFeeStatus, sqlx::Error> {
        let rows = Self::find_rows(pool, student_id).await?;
        Ok(StudentFeeStatus::from_submissions(
            rows.iter().map(|r| (r.fee_type, r.submission())),
        ))
    }

    /// Write `next` if the row is still in `expected` status.
    ///
    /// Returns `None` when a concurrent submission or review already moved
    /// the row on.
    pub async fn transition(
        pool: &PgPool,
        student_id: DbId,
        fee_type: FeeType,
        expected: FeeStatus,
        next: &FeeSubmission,
    ) -> Result<Option<FeeRow>, sqlx::Error> {
        let query = format!(
            "UPDATE fee_submissions SET \
                status = $4, document_url = $5, submitted_at = $6, \
                updated_at = $7, rejection_reason = $8 \
             WHERE student_id = $1 AND fee_type = $2 AND status = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FeeRow>(&query)
            .bind(student_id)
            .bind(fee_type.as_str())
            .bind(expected.as_str())
            .bind(next.status.as_str())
            .bind(next.document_url.as_deref())
            .bind(next.submitted_at)
            .bind(next.updated_at)
            .bind(next.rejection_reason.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Every student (optionally in one hostel) with their fee submissions,
    /// ordered by student id. Students without rows are included.
    pub async fn list_student_fees(
        pool: &PgPool,
        hostel: Option<&str>,
    ) -> Result<Vec<StudentFeeRecord>, sqlx::Error> {
        let rows = sqlx::query_as::<_, StudentFeeJoinRow>(
            "SELECT u.id AS student_id, u.name, u.email, u.hostel, u.room_no, \
                    f.fee_type, f.status, f.document_url, f.submitted_at, \
                    f.updated_at, f.rejection_reason \
             FROM users u \
             LEFT JOIN fee_submissions f ON f.student_id = u.id \
             WHERE u.role = 'student' AND ($1::text IS NULL OR u.hostel = $1) \
             ORDER BY u.id, f.fee_type",
        )
        .bind(hostel)
        .fetch_all(pool)
        .await?;
        Ok(group_student_fees(rows))
    }
}
