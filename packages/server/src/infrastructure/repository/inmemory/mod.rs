//! InMemory 実装

mod hub;

pub use hub::InMemoryBoardHubRepository;
