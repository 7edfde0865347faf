pub mod commands;
pub mod election;
pub mod store;

pub use election::{
    Election, ElectionError, ElectionResult, ElectionResults, Outcome, VotingStatus,
};
pub use store::{ElectionStore, StoreError};
