//! Repository 実装

pub mod inmemory;
pub mod resilient;

pub use inmemory::{
    InMemoryDatabase, InMemoryParticipantRepository, InMemoryRoomRepository,
    InMemoryTeamRepository,
};
pub use resilient::{ResilientRepository, RetryPolicy};
