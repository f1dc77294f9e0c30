//! MessagePack-RPC message framing for wirecall.
//!
//! Every frame on the wire is one msgpack array whose first element is an
//! integer type tag:
//!
//! - Request: `[0, id, method, [params...]]` (fixed 4-element array)
//! - Response: `[1, id, error, result]`
//! - Notification: `[2, method, [params...]]` (fixed 3-element array)
//!
//! The array-length marker commits the frame shape before any field is
//! written, so arity is decided by the encoder, never re-checked on send.
//! Incoming frames are decoded into an [`rmpv::Value`] tree and validated
//! structurally; nothing here panics on a type mismatch.

pub mod codec;
pub mod coerce;
pub mod error;
pub mod message;

pub use codec::{read_message, read_response, write_message};
pub use error::{ProtoError, Result};
pub use message::{Message, NOTIFICATION, REQUEST, RESPONSE};
pub use rmpv::Value;
