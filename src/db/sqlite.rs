use crate::db::models::{DynamicRow, PublicUser, UserSummary};
use crate::db::schema::{SQLITE_INIT, SQLITE_SEED};
use crate::error::LabError;
use base64::Engine;
use futures::{StreamExt, TryStreamExt};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{
    Column, ConnectOptions, Connection, Either, FromRow, Pool, Row, Sqlite, TypeInfo, ValueRef,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Engine-style refusal for text carrying more than one statement.
pub const MULTIPLE_STATEMENTS: &str = "You can only execute one statement at a time.";

pub type SqlitePool = Pool<Sqlite>;

/// What `CredentialStore::init` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyPresent,
}

/// Owns the `users` and `sensitive_data` tables.
///
/// Request-time access goes through a lazily connected, read-only pool that never creates the
/// database file: querying before `init` fails like any other store error, and nothing a query
/// carries can write to the seeded tables. Connections are checked out per query and returned
/// when the query finishes, on success or failure.
#[derive(Clone)]
pub struct CredentialStore {
    path: PathBuf,
    pool: SqlitePool,
}

impl CredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let opts = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(false)
            .read_only(true);
        let pool = SqlitePoolOptions::new().connect_lazy_with(opts);
        Self { path, pool }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create and seed the store unless its file already exists.
    ///
    /// Creating the file is exclusive, so of two concurrent calls only one seeds. A failed seed
    /// removes the file again so a later call can retry.
    pub async fn init(&self) -> Result<InitOutcome, LabError> {
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                info!(path = %self.path.display(), "database already exists; skipping initialization");
                return Ok(InitOutcome::AlreadyPresent);
            }
            Err(e) => return Err(e.into()),
        }

        info!(path = %self.path.display(), "initializing database");
        if let Err(e) = self.seed().await {
            error!(path = %self.path.display(), error = %e, "database initialization failed");
            if let Err(rm) = tokio::fs::remove_file(&self.path).await {
                warn!(path = %self.path.display(), error = %rm, "could not remove partial database");
            }
            return Err(e);
        }

        let users = self.count_users().await?;
        let secrets = self.count_secrets().await?;
        info!(
            path = %self.path.display(),
            users,
            secrets,
            "database initialized"
        );
        Ok(InitOutcome::Created)
    }

    async fn seed(&self) -> Result<(), LabError> {
        let mut conn = SqliteConnectOptions::new()
            .filename(&self.path)
            .connect()
            .await?;

        let mut tx = conn.begin().await?;
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';').chain(SQLITE_SEED.split(';')) {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        conn.close().await?;
        Ok(())
    }

    /// Run caller-built SQL text exactly as given and return the rows of its one statement.
    ///
    /// Text holding a second statement after the first is refused with `MULTIPLE_STATEMENTS`;
    /// trailing comments and whitespace do not count.
    pub async fn query_text(&self, sql: &str) -> Result<Vec<DynamicRow>, sqlx::Error> {
        let mut results = sqlx::raw_sql(sql).fetch_many(&self.pool);
        let mut rows = Vec::new();
        while let Some(step) = results.try_next().await? {
            match step {
                Either::Right(row) => rows.push(row_to_json(&row)?),
                // end of the first statement: anything after it is a stacked statement
                Either::Left(_) => {
                    if results.next().await.is_some() {
                        return Err(sqlx::Error::Protocol(MULTIPLE_STATEMENTS.to_string()));
                    }
                    break;
                }
            }
        }
        Ok(rows)
    }

    /// Run a fixed template with every value bound as a parameter.
    ///
    /// The template is `'static`: it can only come from the binary, never from a request.
    pub async fn query_bound<T>(
        &self,
        template: &'static str,
        params: &[&str],
    ) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(template);
        for param in params {
            query = query.bind(param.to_string());
        }
        query.fetch_all(&self.pool).await
    }

    pub async fn find_public_users(
        &self,
        template: &'static str,
        username: &str,
        password: &str,
    ) -> Result<Vec<PublicUser>, sqlx::Error> {
        self.query_bound(template, &[username, password]).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, LabError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, role, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn count_users(&self) -> Result<i64, LabError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    pub async fn count_secrets(&self) -> Result<i64, LabError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sensitive_data")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

fn row_to_json(row: &SqliteRow) -> Result<DynamicRow, sqlx::Error> {
    let mut out = DynamicRow::new();
    for column in row.columns() {
        let idx = column.ordinal();
        out.insert(column.name().to_string(), column_value(row, idx)?);
    }
    Ok(out)
}

/// Decode by the value's storage class, not the declared column type.
fn column_value(row: &SqliteRow, idx: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage = raw.type_info().name().to_string();
    let value = match storage.as_str() {
        "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(idx)?),
        "REAL" => Value::from(row.try_get_unchecked::<f64, _>(idx)?),
        "BLOB" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
            Value::from(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        _ => Value::from(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(value)
}
