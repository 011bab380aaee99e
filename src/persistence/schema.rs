//! One-time creation of the votes table.
//!
//! [`SchemaInitializer`] runs `CREATE TABLE` at most once per service
//! context. "Already exists" is a successful outcome. Any other failure
//! reported by the store is cached and returned to all later callers; a
//! failure to reach the store is not cached.

use std::fmt;

use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::error::VoteError;

/// SQLSTATE `duplicate_table`.
const DUPLICATE_TABLE: &str = "42P07";
/// SQLSTATE `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// Catalog index hit when two sessions create the same table concurrently.
const PG_TYPE_NAME_INDEX: &str = "pg_type_typname_nsp_index";
/// Longest identifier PostgreSQL keeps without truncation.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Validated, unquoted SQL identifier naming the votes table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Validates `name` as a table identifier.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError::Configuration`] unless `name` starts with an
    /// ASCII letter or `_`, continues with ASCII alphanumerics or `_`, and
    /// is at most 63 bytes long.
    pub fn new(name: impl Into<String>) -> Result<Self, VoteError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
            return Err(VoteError::Configuration(format!(
                "invalid table name: {name:?}"
            )));
        }
        Ok(Self(name))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self("votes".to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful result of [`SchemaInitializer::ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// This context created the table.
    Created,
    /// The table was already there.
    AlreadyExists,
}

/// Ensures the votes table exists before any repository call.
#[derive(Debug)]
pub struct SchemaInitializer {
    table: TableName,
    outcome: OnceCell<Result<SchemaOutcome, String>>,
}

impl SchemaInitializer {
    /// Creates an initializer for `table`. No I/O happens until
    /// [`SchemaInitializer::ensure_schema`].
    #[must_use]
    pub fn new(table: TableName) -> Self {
        Self {
            table,
            outcome: OnceCell::new(),
        }
    }

    /// Table this initializer manages.
    #[must_use]
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Returns `true` once the create statement has reached the store and
    /// its outcome is cached.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.outcome.initialized()
    }

    /// Creates the table on the first call; later calls return the cached
    /// outcome.
    ///
    /// A failure to reach the store is not cached, so the next call tries
    /// again once the store is back.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError::Storage`] if the store could not be reached, or
    /// [`VoteError::Schema`] if creation failed for any reason other than
    /// the table already existing.
    pub async fn ensure_schema(&self, pool: &PgPool) -> Result<SchemaOutcome, VoteError> {
        let cached = self.outcome.get_or_try_init(|| self.create(pool)).await?;
        match cached {
            Ok(outcome) => Ok(*outcome),
            Err(reason) => Err(VoteError::Schema(reason.clone())),
        }
    }

    async fn create(&self, pool: &PgPool) -> Result<Result<SchemaOutcome, String>, VoteError> {
        let sql = create_table_sql(&self.table);
        match sqlx::query(&sql).execute(pool).await {
            Ok(_) => {
                tracing::info!(table = %self.table, "votes table created");
                Ok(Ok(SchemaOutcome::Created))
            }
            Err(e) if is_already_exists(&e) => {
                tracing::info!(table = %self.table, "votes table already exists");
                Ok(Ok(SchemaOutcome::AlreadyExists))
            }
            Err(e) if is_unreachable(&e) => {
                tracing::warn!(table = %self.table, error = %e, "store unreachable during table creation");
                Err(VoteError::Storage(e.to_string()))
            }
            Err(e) => {
                tracing::error!(table = %self.table, error = %e, "unable to create votes table");
                Ok(Err(format!("unable to create table {}: {e}", self.table)))
            }
        }
    }
}

fn create_table_sql(table: &TableName) -> String {
    format!(
        "CREATE TABLE {table} (\
         id SERIAL PRIMARY KEY, \
         campaign_id INTEGER NOT NULL, \
         user_id INTEGER NOT NULL, \
         union_id INTEGER NOT NULL, \
         approve BOOLEAN NOT NULL)"
    )
}

fn is_already_exists(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => is_benign_code(db.code().as_deref(), db.constraint()),
        _ => false,
    }
}

/// Connection-level failures; the statement never ran.
fn is_unreachable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

fn is_benign_code(code: Option<&str>, constraint: Option<&str>) -> bool {
    match code {
        Some(DUPLICATE_TABLE) => true,
        Some(UNIQUE_VIOLATION) => constraint == Some(PG_TYPE_NAME_INDEX),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["votes", "_votes", "votes_2024", "Votes"] {
            let Ok(table) = TableName::new(name) else {
                panic!("{name} should be valid");
            };
            assert_eq!(table.as_str(), name);
        }
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        for name in [
            "",
            "1votes",
            "votes; DROP TABLE users",
            "vo-tes",
            "\"votes\"",
            "vötes",
        ] {
            assert!(
                matches!(TableName::new(name), Err(VoteError::Configuration(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_identifier() {
        assert!(TableName::new("v".repeat(MAX_IDENTIFIER_LEN)).is_ok());
        assert!(TableName::new("v".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
    }

    #[test]
    fn default_table_is_votes() {
        assert_eq!(TableName::default().to_string(), "votes");
    }

    #[test]
    fn duplicate_table_is_benign() {
        assert!(is_benign_code(Some("42P07"), None));
    }

    #[test]
    fn concurrent_create_catalog_race_is_benign() {
        assert!(is_benign_code(
            Some("23505"),
            Some("pg_type_typname_nsp_index")
        ));
    }

    #[test]
    fn other_failures_are_fatal() {
        assert!(!is_benign_code(Some("42501"), None)); // insufficient_privilege
        assert!(!is_benign_code(Some("42601"), None)); // syntax_error
        assert!(!is_benign_code(Some("23505"), Some("votes_pkey")));
        assert!(!is_benign_code(None, None));
        assert!(!is_already_exists(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn connection_failures_are_unreachable() {
        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        assert!(is_unreachable(&sqlx::Error::Io(refused)));
        assert!(is_unreachable(&sqlx::Error::PoolTimedOut));
        assert!(is_unreachable(&sqlx::Error::PoolClosed));
        assert!(!is_unreachable(&sqlx::Error::RowNotFound));
        assert!(!is_already_exists(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn create_statement_names_all_columns() {
        let sql = create_table_sql(&TableName::default());
        assert!(sql.starts_with("CREATE TABLE votes ("));
        for column in ["id SERIAL", "campaign_id", "user_id", "union_id", "approve BOOLEAN"] {
            assert!(sql.contains(column), "missing {column}");
        }
    }

    #[test]
    fn new_initializer_has_not_run() {
        let schema = SchemaInitializer::new(TableName::default());
        assert!(!schema.is_initialized());
        assert_eq!(schema.table().as_str(), "votes");
    }
}
