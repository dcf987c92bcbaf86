//! Data Transfer Objects for the chat relay wire format.
//!
//! - `envelope`: the JSON envelope codec (inbound command decode, outbound
//!   event types and encode)
//! - `conversion`: DTO ⇄ domain entity conversions

pub mod conversion;
pub mod envelope;
