use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Postgres-backed document store
///
/// All collections share one `documents` table with a JSONB body. Filters
/// are evaluated with `body @> $filter`, backed by a GIN index, and unique
/// fields are enforced by partial unique indexes (see `migrations/`).
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool using the database section of the config.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(config.connection_string().expose_secret())
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps unique index violations to `Conflict`, everything else to `Sqlx`.
fn map_write_error(collection: Collection, e: sqlx::Error) -> Error {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict(format!(
            "A document in {} with this value already exists",
            collection
        )),
        _ => Error::Sqlx(e),
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, collection: Collection, id: Uuid, document: Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection.as_ref())
        .bind(id)
        .bind(Json(document))
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(collection, e))?;

        Ok(())
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let rows = sqlx::query_scalar::<_, Json<Document>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY id
            "#,
        )
        .bind(collection.as_ref())
        .bind(Json(filter.as_value()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(body)| body).collect())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let row = sqlx::query_scalar::<_, Json<Document>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(collection.as_ref())
        .bind(Json(filter.as_value()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(body)| body))
    }

    async fn replace(&self, collection: Collection, id: Uuid, document: Document) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.as_ref())
        .bind(id)
        .bind(Json(document))
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(collection, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND body @> $2
            "#,
        )
        .bind(collection.as_ref())
        .bind(Json(filter.as_value()))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
