use wirecall_proto::ProtoError;
use wirecall_transport::TransportError;

/// Errors surfaced by client operations.
///
/// Nothing is retried internally except the connection itself, behind the
/// reconnect gate; a failed request is never replayed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An active dial or redial failed.
    #[error("connect failed: {0}")]
    Connect(#[source] TransportError),

    /// The client is disconnected and the reconnect cooldown has not yet
    /// elapsed, so no dial was attempted.
    #[error("connection is disconnected")]
    NotConnected,

    /// Encode, decode, or remote failure at the protocol layer.
    #[error(transparent)]
    Proto(#[from] ProtoError),

    /// Writing a frame to the stream failed.
    #[error("failed to write frame: {0}")]
    Write(#[source] std::io::Error),

    /// Stream-level configuration (deadlines, shutdown) failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response id does not match the id just sent. The connection is
    /// left open, but the stream may now hold a frame destined for a later
    /// call; callers should treat it as unsynchronized.
    #[error("message id mismatch (sent {sent}, received {received})")]
    IdMismatch { sent: u32, received: u32 },
}

pub type Result<T> = std::result::Result<T, ClientError>;
