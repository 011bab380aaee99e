//! Vote records as exchanged over the wire and stored in the database.
//!
//! [`Vote`] is the stored entity; [`NewVote`] is the creation payload and
//! never carries an `id`, since ids are assigned by the store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::VoteError;

/// A vote as stored: a campaign/user/union triple plus the approval flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Vote {
    /// Store-assigned surrogate key.
    pub id: i32,
    /// Campaign being voted on.
    pub campaign_id: i32,
    /// Voter.
    pub user_id: i32,
    /// Union or group scope of the vote.
    pub union_id: i32,
    /// The vote's value.
    pub approve: bool,
}

/// Request body for `POST /votes`.
///
/// All four fields are required. An `id` key in the payload is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewVote {
    /// Campaign being voted on.
    pub campaign_id: i32,
    /// Voter.
    pub user_id: i32,
    /// Union or group scope of the vote.
    pub union_id: i32,
    /// The vote's value.
    pub approve: bool,
}

impl NewVote {
    /// Decodes a creation payload from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError::Decode`] if the body is not a JSON object with
    /// the four required, correctly typed fields.
    pub fn from_json(payload: &[u8]) -> Result<Self, VoteError> {
        let value: serde_json::Value =
            serde_json::from_slice(payload).map_err(|e| VoteError::Decode(e.to_string()))?;
        // Derived struct deserializers also accept sequences.
        if !value.is_object() {
            return Err(VoteError::Decode("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| VoteError::Decode(e.to_string()))
    }
}
