//! Repository implementations.
//!
//! Currently only the in-memory implementation exists; the chat relay keeps
//! no state beyond the process lifetime.

pub mod inmemory;

pub use inmemory::InMemoryChatRepository;
