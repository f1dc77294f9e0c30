/// Errors that can occur while encoding or decoding protocol messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// Failed to encode a message into the output stream.
    #[error("failed to encode message: {0}")]
    Encode(#[from] rmpv::encode::Error),

    /// Failed to read a value from the input stream (truncation or I/O).
    #[error("failed to read message: {0}")]
    Read(#[from] rmpv::decode::Error),

    /// The decoded value does not have the shape of a protocol message.
    #[error("malformed message: {0}")]
    Malformed(&'static str),

    /// The remote side reported an error value in a response frame.
    #[error("remote error: {0}")]
    Remote(String),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
