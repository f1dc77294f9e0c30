use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use std::time::Duration;

use crate::endpoint::Endpoint;
use crate::error::Result;

/// A connected byte stream — implements Read + Write.
///
/// This is the fundamental I/O type returned by dial operations. It wraps
/// either a TCP stream or a Unix domain socket stream and exposes the
/// deadline and shutdown controls the client layer needs.
pub struct RpcStream {
    inner: StreamInner,
}

enum StreamInner {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Read for RpcStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            StreamInner::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for RpcStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            StreamInner::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            StreamInner::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.flush(),
        }
    }
}

impl RpcStream {
    /// Create an RpcStream from a connected TCP stream.
    pub fn from_tcp(stream: TcpStream) -> Self {
        Self {
            inner: StreamInner::Tcp(stream),
        }
    }

    /// Create an RpcStream from a connected Unix domain socket stream.
    #[cfg(unix)]
    pub fn from_unix(stream: UnixStream) -> Self {
        Self {
            inner: StreamInner::Unix(stream),
        }
    }

    /// Set the read timeout on the underlying stream.
    ///
    /// A blocked read fails with `WouldBlock`/`TimedOut` once the timeout
    /// elapses. `None` blocks indefinitely.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.inner {
            StreamInner::Tcp(stream) => stream.set_read_timeout(timeout).map_err(Into::into),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.set_read_timeout(timeout).map_err(Into::into),
        }
    }

    /// Set the write timeout on the underlying stream.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.inner {
            StreamInner::Tcp(stream) => stream.set_write_timeout(timeout).map_err(Into::into),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.set_write_timeout(timeout).map_err(Into::into),
        }
    }

    /// Set both read and write timeouts at once.
    pub fn set_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.set_read_timeout(timeout)?;
        self.set_write_timeout(timeout)
    }

    /// Shut down both halves of the stream.
    ///
    /// Blocked operations in other contexts surface an I/O error.
    pub fn shutdown(&self) -> Result<()> {
        match &self.inner {
            StreamInner::Tcp(stream) => stream.shutdown(Shutdown::Both).map_err(Into::into),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.shutdown(Shutdown::Both).map_err(Into::into),
        }
    }

    /// The endpoint of the connected peer, when the platform can recover it.
    ///
    /// Unnamed Unix socket peers (e.g. from `UnixStream::pair`) have no
    /// dialable address and return `None`.
    pub fn peer_endpoint(&self) -> Option<Endpoint> {
        match &self.inner {
            StreamInner::Tcp(stream) => stream
                .peer_addr()
                .ok()
                .map(|addr| Endpoint::Tcp(addr.to_string())),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream
                .peer_addr()
                .ok()
                .and_then(|addr| addr.as_pathname().map(|p| Endpoint::Unix(p.to_path_buf()))),
        }
    }
}

impl std::fmt::Debug for RpcStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            StreamInner::Tcp(_) => f.debug_struct("RpcStream").field("type", &"tcp").finish(),
            #[cfg(unix)]
            StreamInner::Unix(_) => f.debug_struct("RpcStream").field("type", &"unix").finish(),
        }
    }
}
