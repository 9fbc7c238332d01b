//! Repository for the `transit_entries` table.

use hostelia_core::transit::TransitDirection;
use hostelia_core::types::DbId;
use sqlx::PgPool;

use crate::models::transit::{CreateTransit, TransitEntry};

const COLUMNS: &str = "\
    t.id, t.student_id, u.name AS student_name, t.hostel, t.direction, t.purpose, \
    t.created_at";

pub struct TransitRepo;

impl TransitRepo {
    pub async fn create(pool: &PgPool, input: &CreateTransit) -> Result<TransitEntry, sqlx::Error> {
        let query = format!(
            "WITH t AS ( \
                INSERT INTO transit_entries (student_id, hostel, direction, purpose) \
                VALUES ($1, $2, $3, $4) \
                RETURNING * \
             ) \
             SELECT {COLUMNS} FROM t JOIN users u ON u.id = t.student_id"
        );
        sqlx::query_as::<_, TransitEntry>(&query)
            .bind(input.student_id)
            .bind(&input.hostel)
            .bind(input.direction.as_str())
            .bind(input.purpose.trim())
            .fetch_one(pool)
            .await
    }

    /// Direction of the student's most recent entry, if any.
    pub async fn last_direction(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Option<TransitDirection>, sqlx::Error> {
        let direction: Option<String> = sqlx::query_scalar(
            "SELECT direction FROM transit_entries WHERE student_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(student_id)
        .fetch_optional(pool)
        .await?;
        direction
            .map(|d| d.parse().map_err(|e| sqlx::Error::Decode(Box::new(e))))
            .transpose()
    }

    /// One page of entries, newest first, for one student or one hostel
    /// (both `None` lists everything).
    pub async fn list(
        pool: &PgPool,
        student_id: Option<DbId>,
        hostel: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TransitEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transit_entries t JOIN users u ON u.id = t.student_id \
             WHERE ($1::bigint IS NULL OR t.student_id = $1) \
               AND ($2::text IS NULL OR t.hostel = $2) \
             ORDER BY t.created_at DESC, t.id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, TransitEntry>(&query)
            .bind(student_id)
            .bind(hostel)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        student_id: Option<DbId>,
        hostel: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transit_entries \
             WHERE ($1::bigint IS NULL OR student_id = $1) \
               AND ($2::text IS NULL OR hostel = $2)",
        )
        .bind(student_id)
        .bind(hostel)
        .fetch_one(pool)
        .await
    }

    /// Students whose latest entry is an exit.
    pub async fn count_outside(pool: &PgPool, hostel: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ( \
                SELECT DISTINCT ON (student_id) direction \
                FROM transit_entries \
                WHERE ($1::text IS NULL OR hostel = $1) \
                ORDER BY student_id, created_at DESC, id DESC \
             ) latest WHERE latest.direction = 'EXIT'",
        )
        .bind(hostel)
        .fetch_one(pool)
        .await
    }
}
