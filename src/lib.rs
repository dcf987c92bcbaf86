//! Room-based WebSocket chat relay library.
//!
//! Clients connect over WebSocket, register a nickname, join named rooms and
//! exchange text messages that are fanned out to all current room members.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
