//! Repository for the `users` table.

use hostelia_core::listing::ListFilter;
use hostelia_core::roles::Role;
use hostelia_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, name, email, password_hash, role, hostel, room_no, year, \
    created_at, updated_at";

/// Shared WHERE clause for student listings. Binds: $1 hostel, $2 year,
/// $3 ILIKE pattern.
const STUDENT_FILTER: &str = "\
    role = 'student' \
    AND ($1::text IS NULL OR hostel = $1) \
    AND ($2::smallint IS NULL OR year = $2) \
    AND ($3::text IS NULL OR name ILIKE $3 OR email ILIKE $3)";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, hostel, room_no, year) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(input.hostel.as_deref())
            .bind(input.room_no.as_deref())
            .bind(input.year)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Emails are matched case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// One page of students matching `filter`, ordered by name.
    pub async fn list_students(
        pool: &PgPool,
        filter: &ListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let filter = filter.normalized();
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE {STUDENT_FILTER} \
             ORDER BY LOWER(name), name, id \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(filter.hostel.as_deref())
            .bind(filter.year)
            .bind(filter.search_pattern())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_students(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
        let filter = filter.normalized();
        let query = format!("SELECT COUNT(*) FROM users WHERE {STUDENT_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.hostel.as_deref())
            .bind(filter.year)
            .bind(filter.search_pattern())
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_role(pool: &PgPool, role: Role) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY hostel, LOWER(name), id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role.as_str())
            .fetch_all(pool)
            .await
    }

    /// Delete a user. Their complaints, fee rows, feedback and transit
    /// entries go with them. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
