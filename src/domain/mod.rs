//! Domain layer: the vote record and its creation payload.

pub mod vote;

pub use vote::{NewVote, Vote};
