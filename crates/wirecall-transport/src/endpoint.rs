use std::fmt;
use std::net::{TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::stream::RpcStream;

/// A dialable remote endpoint.
///
/// Parses from and displays as a URI-like string: `tcp://host:port` or
/// `unix:///path/to.sock`. A bare `host:port` is treated as TCP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// TCP address, resolved via `ToSocketAddrs` at dial time.
    Tcp(String),
    /// Filesystem-path Unix domain socket.
    #[cfg(unix)]
    Unix(PathBuf),
}

impl Endpoint {
    /// TCP endpoint from a `host:port` address string.
    pub fn tcp(addr: impl Into<String>) -> Self {
        Endpoint::Tcp(addr.into())
    }

    /// Unix domain socket endpoint from a filesystem path.
    #[cfg(unix)]
    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Endpoint::Unix(path.into())
    }

    /// Dial the endpoint (blocking).
    ///
    /// With a `timeout`, TCP dials are bounded per resolved address; every
    /// address produced by resolution is tried until one connects. Without
    /// one, the dial blocks indefinitely. Unix socket connects are local and
    /// complete immediately, so the bound does not apply to them.
    pub fn connect(&self, timeout: Option<Duration>) -> Result<RpcStream> {
        match self {
            Endpoint::Tcp(addr) => {
                let stream = match timeout {
                    Some(limit) if !limit.is_zero() => self.connect_tcp_bounded(addr, limit)?,
                    _ => TcpStream::connect(addr).map_err(|source| TransportError::Connect {
                        endpoint: self.clone(),
                        source,
                    })?,
                };
                debug!(endpoint = %self, "connected");
                Ok(RpcStream::from_tcp(stream))
            }
            #[cfg(unix)]
            Endpoint::Unix(path) => {
                let stream =
                    UnixStream::connect(path).map_err(|source| TransportError::Connect {
                        endpoint: self.clone(),
                        source,
                    })?;
                debug!(endpoint = %self, "connected");
                Ok(RpcStream::from_unix(stream))
            }
        }
    }

    fn connect_tcp_bounded(&self, addr: &str, limit: Duration) -> Result<TcpStream> {
        let addrs = addr
            .to_socket_addrs()
            .map_err(|source| TransportError::Connect {
                endpoint: self.clone(),
                source,
            })?;

        let mut last_err = None;
        for sock_addr in addrs {
            match TcpStream::connect_timeout(&sock_addr, limit) {
                Ok(stream) => return Ok(stream),
                Err(err) => last_err = Some(err),
            }
        }

        Err(match last_err {
            Some(source) => TransportError::Connect {
                endpoint: self.clone(),
                source,
            },
            None => TransportError::Resolve(addr.to_string()),
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp(addr) => write!(f, "tcp://{addr}"),
            #[cfg(unix)]
            Endpoint::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

impl FromStr for Endpoint {
    type Err = TransportError;

    fn from_str(input: &str) -> Result<Self> {
        if let Some(addr) = input.strip_prefix("tcp://") {
            if addr.is_empty() {
                return Err(TransportError::InvalidEndpoint {
                    input: input.to_string(),
                    reason: "empty tcp address",
                });
            }
            return Ok(Endpoint::Tcp(addr.to_string()));
        }
        if let Some(path) = input.strip_prefix("unix://") {
            #[cfg(unix)]
            {
                if path.is_empty() {
                    return Err(TransportError::InvalidEndpoint {
                        input: input.to_string(),
                        reason: "empty socket path",
                    });
                }
                return Ok(Endpoint::Unix(PathBuf::from(path)));
            }
            #[cfg(not(unix))]
            {
                let _ = path;
                return Err(TransportError::InvalidEndpoint {
                    input: input.to_string(),
                    reason: "unix sockets are not supported on this platform",
                });
            }
        }
        if input.contains("://") {
            return Err(TransportError::InvalidEndpoint {
                input: input.to_string(),
                reason: "unknown scheme (expected tcp:// or unix://)",
            });
        }
        // Bare host:port shorthand.
        if input.is_empty() {
            return Err(TransportError::InvalidEndpoint {
                input: input.to_string(),
                reason: "empty endpoint",
            });
        }
        Ok(Endpoint::Tcp(input.to_string()))
    }
}
