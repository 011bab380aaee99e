//! Vote service: submit and list votes.

use std::sync::Arc;

use crate::domain::{NewVote, Vote};
use crate::error::VoteError;
use crate::persistence::{ConnectionPool, SchemaInitializer, VoteRepository};

/// Long-lived service context shared by all handlers.
///
/// Owns the exactly-once state of the process: the connection pool and
/// the schema flag. Every storage operation follows the pattern:
/// acquire pool → ensure schema → run repository call.
#[derive(Debug)]
pub struct VoteService {
    pool: Arc<ConnectionPool>,
    schema: SchemaInitializer,
}

impl VoteService {
    /// Creates a new `VoteService`.
    #[must_use]
    pub fn new(pool: Arc<ConnectionPool>, schema: SchemaInitializer) -> Self {
        Self { pool, schema }
    }

    /// Returns a reference to the inner [`ConnectionPool`].
    #[must_use]
    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    /// Returns a reference to the inner [`SchemaInitializer`].
    #[must_use]
    pub fn schema(&self) -> &SchemaInitializer {
        &self.schema
    }

    /// Decodes `payload` and stores it as a new vote.
    ///
    /// Decoding happens before the pool or schema is touched, so a
    /// malformed payload never reaches storage.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError::Decode`] for a malformed payload, or the pool,
    /// schema, or storage error that prevented the insert.
    pub async fn submit_vote(&self, payload: &[u8]) -> Result<Vote, VoteError> {
        let new_vote = NewVote::from_json(payload)?;
        let repository = self.repository().await?;
        let vote = repository.insert(&new_vote).await?;

        tracing::info!(
            id = vote.id,
            campaign_id = vote.campaign_id,
            union_id = vote.union_id,
            approve = vote.approve,
            "vote recorded"
        );
        Ok(vote)
    }

    /// Lists every stored vote.
    ///
    /// # Errors
    ///
    /// Returns the pool, schema, or storage error that prevented the scan,
    /// or [`VoteError::RowCoercion`] if any row cannot be decoded.
    pub async fn list_votes(&self) -> Result<Vec<Vote>, VoteError> {
        let votes = self.repository().await?.list_all().await?;
        tracing::debug!(count = votes.len(), "votes listed");
        Ok(votes)
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the error reported by [`ConnectionPool::ping`].
    pub async fn ping(&self) -> Result<(), VoteError> {
        self.pool.ping().await
    }

    /// Releases all pooled connections.
    pub async fn shutdown(&self) {
        self.pool.close().await;
    }

    async fn repository(&self) -> Result<VoteRepository, VoteError> {
        let pool = self.pool.acquire().await?;
        self.schema.ensure_schema(pool).await?;
        Ok(VoteRepository::new(pool.clone(), self.schema.table().clone()))
    }
}
