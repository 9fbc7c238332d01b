//! Repository for the `complaints` table.
//!
//! Status transitions are conditional on the status the caller read, so of
//! two concurrent transitions on the same complaint only one can succeed.

use hostelia_core::complaint::{ComplaintProgress, ComplaintStatus};
use hostelia_core::listing::ListFilter;
use hostelia_core::types::DbId;
use sqlx::PgPool;

use crate::models::complaint::{Complaint, CreateComplaint};

const COLUMNS: &str = "\
    id, student_id, title, description, category, hostel, room_no, image_url, \
    status, student_status, created_at, updated_at, resolved_at, student_verified_at";

/// Shared WHERE clause. Binds: $1 student, $2 hostel, $3 status,
/// $4 category, $5 title ILIKE pattern.
const LIST_FILTER: &str = "\
    ($1::bigint IS NULL OR student_id = $1) \
    AND ($2::text IS NULL OR hostel = $2) \
    AND ($3::text IS NULL OR status = $3) \
    AND ($4::text IS NULL OR category = $4) \
    AND ($5::text IS NULL OR title ILIKE $5)";

/// Which complaints a caller may see: one student's, one hostel's, or
/// (both `None`) all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintScope {
    pub student_id: Option<DbId>,
    pub hostel: Option<String>,
}

pub struct ComplaintRepo;

impl ComplaintRepo {
    pub async fn create(pool: &PgPool, input: &CreateComplaint) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints \
                (student_id, title, description, category, hostel, room_no, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(input.student_id)
            .bind(input.title.trim())
            .bind(input.description.trim())
            .bind(input.category.as_str())
            .bind(&input.hostel)
            .bind(&input.room_no)
            .bind(input.image_url.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of complaints in `scope` matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        scope: &ComplaintScope,
        filter: &ListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let filter = filter.normalized();
        let query = format!(
            "SELECT {COLUMNS} FROM complaints WHERE {LIST_FILTER} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(scope.student_id)
            .bind(scope.hostel.as_deref())
            .bind(filter.status.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.search_pattern())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        scope: &ComplaintScope,
        filter: &ListFilter,
    ) -> Result<i64, sqlx::Error> {
        let filter = filter.normalized();
        let query = format!("SELECT COUNT(*) FROM complaints WHERE {LIST_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(scope.student_id)
            .bind(scope.hostel.as_deref())
            .bind(filter.status.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.search_pattern())
            .fetch_one(pool)
            .await
    }

    /// Every complaint in `scope`, for dashboard aggregation.
    pub async fn list_all(pool: &PgPool, scope: &ComplaintScope) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints \
             WHERE ($1::bigint IS NULL OR student_id = $1) \
               AND ($2::text IS NULL OR hostel = $2) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(scope.student_id)
            .bind(scope.hostel.as_deref())
            .fetch_all(pool)
            .await
    }

    /// Write `next` if the complaint is still in `expected` status.
    ///
    /// Returns `None` when the row is gone or another transition got there
    /// first.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        expected: ComplaintStatus,
        next: &ComplaintProgress,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET \
                status = $3, student_status = $4, updated_at = $5, \
                resolved_at = $6, student_verified_at = $7 \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .bind(expected.as_str())
            .bind(next.status.as_str())
            .bind(next.student_status.as_str())
            .bind(next.updated_at)
            .bind(next.resolved_at)
            .bind(next.student_verified_at)
            .fetch_optional(pool)
            .await
    }
}
