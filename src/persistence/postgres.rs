//! PostgreSQL vote repository.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::schema::TableName;
use crate::domain::{NewVote, Vote};
use crate::error::VoteError;

const COLUMNS: &str = "id, campaign_id, user_id, union_id, approve";

/// Translates between [`Vote`] and rows of the votes table.
///
/// The only component that issues SQL. Neither operation retries.
#[derive(Debug, Clone)]
pub struct VoteRepository {
    pool: PgPool,
    table: TableName,
}

impl VoteRepository {
    /// Creates a repository over `table` using the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool, table: TableName) -> Self {
        Self { pool, table }
    }

    /// Inserts a vote and returns the row as stored, including the
    /// store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError::Storage`] on database failure, or
    /// [`VoteError::RowCoercion`] if the returned row cannot be decoded.
    pub async fn insert(&self, vote: &NewVote) -> Result<Vote, VoteError> {
        let sql = format!(
            "INSERT INTO {} (campaign_id, user_id, union_id, approve) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}",
            self.table
        );
        let row = sqlx::query(&sql)
            .bind(vote.campaign_id)
            .bind(vote.user_id)
            .bind(vote.union_id)
            .bind(vote.approve)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| VoteError::Storage(e.to_string()))?;

        decode_row(&row)
    }

    /// Loads every stored vote, in whatever order the store returns them.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError::Storage`] on database failure, or
    /// [`VoteError::RowCoercion`] if any row cannot be decoded; no partial
    /// list is returned.
    pub async fn list_all(&self) -> Result<Vec<Vote>, VoteError> {
        let sql = format!("SELECT {COLUMNS} FROM {}", self.table);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| VoteError::Storage(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<Vote, VoteError> {
    Ok(Vote {
        id: column(row, "id")?,
        campaign_id: column(row, "campaign_id")?,
        user_id: column(row, "user_id")?,
        union_id: column(row, "union_id")?,
        approve: column(row, "approve")?,
    })
}

fn column<'r, T>(row: &'r PgRow, name: &'static str) -> Result<T, VoteError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| VoteError::RowCoercion {
        column: name,
        reason: e.to_string(),
    })
}
