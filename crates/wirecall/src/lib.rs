//! Synchronous MessagePack-RPC client over TCP and Unix sockets.
//!
//! wirecall invokes named remote functions with positional arguments over a
//! byte-stream connection, with correlated request/response calls, one-way
//! notifications, and bounded auto-reconnect.
//!
//! # Crate Structure
//!
//! - [`transport`] — Byte-stream transport abstraction (TCP, Unix sockets)
//! - [`proto`] — MessagePack-RPC frame codec and value coercion
//! - [`client`] — Connection lifecycle and call orchestration

/// Re-export transport types.
pub mod transport {
    pub use wirecall_transport::*;
}

/// Re-export protocol types.
pub mod proto {
    pub use wirecall_proto::*;
}

/// Re-export client types.
pub mod client {
    pub use wirecall_client::*;
}

pub use wirecall_client::{Client, ClientConfig, ClientError};
pub use wirecall_proto::Value;
pub use wirecall_transport::Endpoint;
