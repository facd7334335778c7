use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use tinylink_core::error::StorageError;
use tinylink_core::store::{LinkStore, ReadLinkStore, Result};
use tinylink_core::{Link, LinkId, NewLink, ShortCode};
use tracing::{debug, info};
use typed_builder::TypedBuilder;

const SCHEMA: &str = include_str!("../ddl/postgres/links.sql");

const LINK_COLUMNS: &str = "id, short_code, long_url, click_count, click_history, created_at";

/// Connection settings for [`PostgresLinkStore::connect`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct PostgresOptions {
    #[builder(default = 10)]
    max_connections: u32,
    /// Bounds both pool acquisition and each statement on the server.
    #[builder(default = Duration::from_secs(5))]
    timeout: Duration,
}

/// PostgreSQL implementation of the link store contract.
///
/// Uniqueness is enforced by the `UNIQUE (short_code)` constraint, and a
/// click is recorded by one `UPDATE ... RETURNING` statement, so concurrent
/// writers are serialized by the row lock rather than by the caller.
/// Timestamps are stored as microseconds since the Unix epoch.
#[derive(Debug, Clone)]
pub struct PostgresLinkStore {
    pool: PgPool,
}

impl PostgresLinkStore {
    /// Creates a store from an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new connection pool.
    pub async fn connect(database_url: &str, options: PostgresOptions) -> Result<Self> {
        let timeout_ms = options.timeout.as_millis().to_string();
        let connect_options = database_url
            .parse::<PgConnectOptions>()
            .map_err(map_sqlx_error)?
            .options([("statement_timeout", timeout_ms)]);

        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.timeout)
            .connect_with(connect_options)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self::new(pool))
    }

    /// Creates the `links` table and its indexes if they don't exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        info!("links schema is up to date");
        Ok(())
    }
}

fn parse_timestamp(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid timestamp '{}': {e}", micros))
    })
}

fn link_from_row(row: &PgRow) -> Result<Link> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let click_count: i64 = row.try_get("click_count").map_err(map_sqlx_error)?;
    let click_history: Vec<i64> = row.try_get("click_history").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    let click_count = u64::try_from(click_count).map_err(|_| {
        StorageError::InvalidData(format!("negative click count {click_count} for '{short_code}'"))
    })?;
    let click_history = click_history
        .into_iter()
        .map(parse_timestamp)
        .collect::<Result<Vec<_>>>()?;

    Ok(Link {
        id: LinkId::new(id),
        short_code: ShortCode::new_unchecked(short_code),
        long_url,
        click_count,
        click_history,
        created_at: parse_timestamp(created_at)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::Configuration(_) => StorageError::Operation(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        // query_canceled: raised when statement_timeout fires
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some("57014") => {
            StorageError::Timeout(message)
        }
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadLinkStore for PostgresLinkStore {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<Link>> {
        let row = sqlx::query(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1 LIMIT 1"
        ))
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Link>> {
        let rows = sqlx::query(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(link_from_row).collect()
    }
}

#[async_trait]
impl LinkStore for PostgresLinkStore {
    async fn insert(&self, link: NewLink) -> Result<Link> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO links (short_code, long_url, created_at)
            VALUES ($1, $2, $3)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(link.short_code.as_str())
        .bind(&link.long_url)
        .bind(link.created_at.as_microsecond())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => {
                let link = link_from_row(&row)?;
                debug!(code = %link.short_code, id = %link.id, "inserted link");
                Ok(link)
            }
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(link.short_code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn increment_click(&self, code: &ShortCode, at: Timestamp) -> Result<Option<Link>> {
        // A single statement: the row lock serializes concurrent clicks, and
        // GREATEST keeps the history chronological when they race.
        let row = sqlx::query(&format!(
            r#"
            UPDATE links
            SET click_count = click_count + 1,
                click_history = array_append(
                    click_history,
                    GREATEST($2, COALESCE(click_history[cardinality(click_history)], $2))
                )
            WHERE short_code = $1
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(code.as_str())
        .bind(at.as_microsecond())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let result = sqlx::query("DELETE FROM links WHERE short_code = $1")
            .bind(code.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
