//! WordProvider 実装

pub mod random;

pub use random::RandomWordProvider;
