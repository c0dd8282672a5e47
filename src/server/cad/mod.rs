//! Real-time dispatch board.
//!
//! Connected WebSocket clients subscribe to channels (`calls`, `units`, `general`) and receive
//! every CAD event broadcast on those channels. Events are not persisted or replayed; a client
//! only sees what is broadcast while it is connected.

pub mod broadcaster;
pub mod message;
pub mod socket;
