use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::AuthenticatedUser;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Creates or refreshes the profile for `user`.
    /// A missing name in the claims never erases a stored one.
    async fn upsert(&self, user: &AuthenticatedUser) -> Result<()>;
}

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn upsert(&self, user: &AuthenticatedUser) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, full_name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
            SET full_name = COALESCE(EXCLUDED.full_name, profiles.full_name),
                updated_at = NOW()
            "#,
        )
        .bind(&user.sub)
        .bind(user.full_name())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert profile {}: {:?}", user.sub, e);
            AppError::Database(e)
        })?;

        Ok(())
    }
}
