//! Byte-stream transport abstraction for wirecall.
//!
//! Provides a unified interface over the stream transports an RPC client
//! can dial:
//! - TCP (any platform)
//! - Unix domain sockets (Linux/macOS)
//!
//! This is the lowest layer of wirecall. Everything else builds on top of
//! the [`RpcStream`] type provided here.

pub mod endpoint;
pub mod error;
pub mod stream;

pub use endpoint::Endpoint;
pub use error::{Result, TransportError};
pub use stream::RpcStream;
