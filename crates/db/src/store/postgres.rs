//! Postgres-backed [`Store`].
//!
//! Every query text comes from [`Statements`]; parameters are bound
//! positionally in the order documented there.  List statements are
//! streamed straight off the connection with `fetch`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio_stream::StreamExt;
use tracing::info;

use crate::models::{AddressRow, PersonRow};
use crate::statements::Statements;
use crate::store::{RowStream, Sequence, Store};
use crate::DbError;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    statements: Arc<Statements>,
}

impl PgStore {
    pub fn new(pool: PgPool, statements: Statements) -> Self {
        Self {
            pool,
            statements: Arc::new(statements),
        }
    }

    /// Open a pool of at most `max_connections` against `database_url`.
    ///
    /// The two tables and both id sequences must already exist.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        statements: Statements,
    ) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!(max_connections, "connected to postgres");
        Ok(Self::new(pool, statements))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn next_val(&self, sequence: Sequence) -> Result<i64, DbError> {
        let value = sqlx::query_scalar::<_, i64>(self.statements.next_val(sequence))
            .fetch_one(&self.pool)
            .await?;
        Ok(value)
    }

    async fn select_address(&self, id: i32) -> Result<Option<AddressRow>, DbError> {
        let row = sqlx::query_as::<_, AddressRow>(&self.statements.select_address)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_address(&self, row: &AddressRow) -> Result<u64, DbError> {
        let result = sqlx::query(&self.statements.insert_address)
            .bind(row.id)
            .bind(&row.street)
            .bind(&row.zip_code)
            .bind(&row.city)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn select_person(&self, id: i32) -> Result<Option<PersonRow>, DbError> {
        let row = sqlx::query_as::<_, PersonRow>(&self.statements.select_person)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    fn select_all_person(&self) -> RowStream<'_, PersonRow> {
        let rows = sqlx::query_as::<_, PersonRow>(&self.statements.select_all_person)
            .fetch(&self.pool)
            .map(|row| row.map_err(DbError::from));
        Box::pin(rows)
    }

    fn select_all_person_firstname<'a>(&'a self, firstname: &'a str) -> RowStream<'a, PersonRow> {
        let rows = sqlx::query_as::<_, PersonRow>(&self.statements.select_all_person_firstname)
            .bind(firstname)
            .fetch(&self.pool)
            .map(|row| row.map_err(DbError::from));
        Box::pin(rows)
    }

    async fn insert_person(&self, row: &PersonRow) -> Result<u64, DbError> {
        let result = sqlx::query(&self.statements.insert_person)
            .bind(row.id)
            .bind(&row.firstname)
            .bind(&row.lastname)
            .bind(row.age)
            .bind(&row.gender)
            .bind(row.address_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
