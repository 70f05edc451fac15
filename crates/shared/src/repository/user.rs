use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::UserRepositoryTrait, config::ConnectionPool, domain::requests::RegisterRequest,
    errors::RepositoryError, model::User,
};

#[derive(Clone)]
pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to look up user by email: {e}");
            RepositoryError::from(e)
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, role, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to look up user {user_id}: {e}");
            RepositoryError::from(e)
        })?;

        Ok(user)
    }

    async fn create_user(
        &self,
        request: &RegisterRequest,
        hashed_password: &str,
    ) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let role = request.role.as_deref().unwrap_or("customer");

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, name, email, password, role, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(hashed_password)
        .bind(role)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::AlreadyExists("Email already exists".into())
            }
            _ => {
                error!("❌ Failed to create user: {e}");
                RepositoryError::from(e)
            }
        })?;

        info!("✅ User created: {}", user.email);

        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: i32,
        hashed_password: &str,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = $2
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(hashed_password)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update password for user {user_id}: {e}");
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🔄 Password updated for user {user_id}");

        Ok(())
    }
}
