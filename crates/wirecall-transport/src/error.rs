use crate::endpoint::Endpoint;

/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to connect to the specified endpoint.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: Endpoint,
        source: std::io::Error,
    },

    /// The address did not resolve to any socket address.
    #[error("address {0} did not resolve to any socket address")]
    Resolve(String),

    /// The endpoint string could not be parsed.
    #[error("invalid endpoint {input:?}: {reason}")]
    InvalidEndpoint { input: String, reason: &'static str },

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer address of a wrapped stream is unknown, so it cannot be
    /// redialed.
    #[error("peer address unknown; stream cannot be redialed")]
    UnknownPeer,
}

pub type Result<T> = std::result::Result<T, TransportError>;
