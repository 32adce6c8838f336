use crate::models::DbOperator;
use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::{ids::OperatorId, operator::Operator};
use sqlx::{Pool, Postgres};

use super::OperatorRepository;

pub async fn insert_operator(
    pool: &Pool<Postgres>,
    id: &str,
    name: &str,
) -> Result<Option<DbOperator>> {
    let now = Utc::now();

    tracing::debug!("Creating operator: id={}, name={}", id, name);

    let operator = sqlx::query_as::<_, DbOperator>(
        r#"
        INSERT INTO operator (id, operator_name, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (operator_name) DO NOTHING
        RETURNING id, operator_name, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if operator.is_none() {
        tracing::debug!("Operator name already registered: {}", name);
    }

    Ok(operator)
}

pub async fn operator_exists(pool: &Pool<Postgres>, id: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM operator
            WHERE id = $1
        );
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// [`OperatorRepository`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgOperatorRepository {
    pool: Pool<Postgres>,
}

impl PgOperatorRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperatorRepository for PgOperatorRepository {
    async fn insert_operator(&self, id: &OperatorId, name: &str) -> Result<Option<Operator>> {
        insert_operator(&self.pool, id.as_str(), name)
            .await?
            .map(Operator::try_from)
            .transpose()
    }

    async fn operator_exists(&self, id: &OperatorId) -> Result<bool> {
        operator_exists(&self.pool, id.as_str()).await
    }
}
