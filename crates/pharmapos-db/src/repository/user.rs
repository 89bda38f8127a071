//! # User Repository
//!
//! Minimal user persistence. Authentication, password storage and
//! session issuance are external collaborators; these rows exist so
//! sales can reference the cashier who made them.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use pharmapos_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user.
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, role, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by email (unique).
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, role, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Helper to generate a new user ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::testing;
    use chrono::Utc;

    #[tokio::test]
    async fn test_insert_and_get_by_email() {
        let db = testing::test_db().await;
        let user = User {
            id: generate_user_id(),
            name: "Sana".to_string(),
            email: "sana@example.com".to_string(),
            role: "employee".to_string(),
            created_at: Utc::now(),
        };

        db.users().insert(&user).await.unwrap();

        let found = db.users().get_by_email("sana@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, "employee");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = testing::test_db().await;
        let mut user = User {
            id: generate_user_id(),
            name: "Sana".to_string(),
            email: "sana@example.com".to_string(),
            role: "owner".to_string(),
            created_at: Utc::now(),
        };
        db.users().insert(&user).await.unwrap();

        user.id = generate_user_id();
        let err = db.users().insert(&user).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
