//! Synchronous MessagePack-RPC client for wirecall.
//!
//! This is the "just works" layer. Dial an endpoint (or wrap an existing
//! stream), then [`call`](Client::call) remote methods and wait for the
//! correlated result, or fire one-way [`notify`](Client::notify) messages.
//! A client owns exactly one connection and allows one call in flight at a
//! time; failed connections can be transparently redialed behind a cooldown
//! gate.

pub mod client;
pub mod config;
pub mod error;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_RECONNECT_INTERVAL};
pub use error::{ClientError, Result};
