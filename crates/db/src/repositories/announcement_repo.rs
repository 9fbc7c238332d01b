//! Repository for the `announcements` table.

use hostelia_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::{Announcement, CreateAnnouncement};

const COLUMNS: &str = "\
    a.id, a.title, a.message, a.hostel, a.created_by, u.name AS author_name, a.created_at";

pub struct AnnouncementRepo;

impl AnnouncementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "WITH a AS ( \
                INSERT INTO announcements (title, message, hostel, created_by) \
                VALUES ($1, $2, $3, $4) \
                RETURNING * \
             ) \
             SELECT {COLUMNS} FROM a JOIN users u ON u.id = a.created_by"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(input.title.trim())
            .bind(input.message.trim())
            .bind(input.hostel.as_deref())
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements a JOIN users u ON u.id = a.created_by \
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Announcements visible in `hostel` (its own plus global ones), newest
    /// first. `None` lists every announcement.
    pub async fn list_visible(
        pool: &PgPool,
        hostel: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements a JOIN users u ON u.id = a.created_by \
             WHERE ($1::text IS NULL OR a.hostel IS NULL OR a.hostel = $1) \
             ORDER BY a.created_at DESC, a.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(hostel)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_visible(pool: &PgPool, hostel: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM announcements \
             WHERE ($1::text IS NULL OR hostel IS NULL OR hostel = $1)",
        )
        .bind(hostel)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
