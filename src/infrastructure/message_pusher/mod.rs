//! Message pusher implementations.
//!
//! Concrete implementations of the `MessagePusher` trait. Currently only the
//! WebSocket-channel implementation exists.

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
