//! Postgres-backed `BaseVerificationStore`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::BaseVerificationStore;
use crate::domains::verification::{NewVerificationEvent, VerificationEvent};

#[derive(Clone)]
pub struct PostgresVerificationStore {
    pool: PgPool,
}

impl PostgresVerificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseVerificationStore for PostgresVerificationStore {
    async fn save(&self, event: NewVerificationEvent) -> Result<VerificationEvent> {
        VerificationEvent::create(&event, &self.pool).await
    }

    async fn find_by_user(&self, email: &str) -> Result<Vec<VerificationEvent>> {
        VerificationEvent::find_by_user_email(email, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
