//! Repository for `mess_menus` and `mess_feedback`.

use hostelia_core::dashboard::RatingSample;
use hostelia_core::mess::{DayOfWeek, MealType};
use sqlx::PgPool;

use crate::models::mess::{CreateFeedback, MessFeedback, MessMenuEntry, RatingRow};

const MENU_COLUMNS: &str = "id, hostel, day, meal, items, updated_at";

const FEEDBACK_COLUMNS: &str = "\
    f.id, f.student_id, u.name AS student_name, f.hostel, f.meal, f.rating, \
    f.comment, f.created_at";

pub struct MessRepo;

impl MessRepo {
    /// The weekly menu of a hostel, ordered Monday to Sunday, breakfast to
    /// dinner.
    pub async fn menu_for_hostel(
        pool: &PgPool,
        hostel: &str,
    ) -> Result<Vec<MessMenuEntry>, sqlx::Error> {
        let query = format!("SELECT {MENU_COLUMNS} FROM mess_menus WHERE hostel = $1");
        let mut entries = sqlx::query_as::<_, MessMenuEntry>(&query)
            .bind(hostel)
            .fetch_all(pool)
            .await?;
        entries.sort_by_key(|e| (e.day, e.meal));
        Ok(entries)
    }

    /// Replace the items of one menu slot, creating it if needed.
    pub async fn upsert_menu(
        pool: &PgPool,
        hostel: &str,
        day: DayOfWeek,
        meal: MealType,
        items: &[String],
    ) -> Result<MessMenuEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO mess_menus (hostel, day, meal, items) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (hostel, day, meal) \
             DO UPDATE SET items = EXCLUDED.items, updated_at = NOW() \
             RETURNING {MENU_COLUMNS}"
        );
        sqlx::query_as::<_, MessMenuEntry>(&query)
            .bind(hostel)
            .bind(day.as_str())
            .bind(meal.as_str())
            .bind(items)
            .fetch_one(pool)
            .await
    }

    pub async fn create_feedback(
        pool: &PgPool,
        input: &CreateFeedback,
    ) -> Result<MessFeedback, sqlx::Error> {
        let query = format!(
            "WITH f AS ( \
                INSERT INTO mess_feedback (student_id, hostel, meal, rating, comment) \
                VALUES ($1, $2, $3, $4, $5) \
                RETURNING * \
             ) \
             SELECT {FEEDBACK_COLUMNS} FROM f JOIN users u ON u.id = f.student_id"
        );
        sqlx::query_as::<_, MessFeedback>(&query)
            .bind(input.student_id)
            .bind(&input.hostel)
            .bind(input.meal.as_str())
            .bind(input.rating)
            .bind(input.comment.as_deref().map(str::trim).filter(|c| !c.is_empty()))
            .fetch_one(pool)
            .await
    }

    /// One page of feedback, newest first. `None` covers every hostel.
    pub async fn list_feedback(
        pool: &PgPool,
        hostel: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MessFeedback>, sqlx::Error> {
        let query = format!(
            "SELECT {FEEDBACK_COLUMNS} FROM mess_feedback f JOIN users u ON u.id = f.student_id \
             WHERE ($1::text IS NULL OR f.hostel = $1) \
             ORDER BY f.created_at DESC, f.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MessFeedback>(&query)
            .bind(hostel)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_feedback(pool: &PgPool, hostel: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM mess_feedback WHERE ($1::text IS NULL OR hostel = $1)",
        )
        .bind(hostel)
        .fetch_one(pool)
        .await
    }

    /// Every rating in scope, for aggregation.
    pub async fn rating_samples(
        pool: &PgPool,
        hostel: Option<&str>,
    ) -> Result<Vec<RatingSample>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RatingRow>(
            "SELECT meal, rating FROM mess_feedback WHERE ($1::text IS NULL OR hostel = $1)",
        )
        .bind(hostel)
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| RatingSample {
                meal: r.meal,
                rating: r.rating,
            })
            .collect())
    }
}
