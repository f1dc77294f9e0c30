use std::io::Write;
use std::time::{Duration, Instant};

use bytes::{BufMut, BytesMut};
use tracing::{debug, warn};
use wirecall_proto::{codec, Message, Value};
use wirecall_transport::{Endpoint, RpcStream, TransportError};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

const WRITE_BUFFER_CAPACITY: usize = 4 * 1024;

/// Synchronous MessagePack-RPC client over one byte-stream connection.
///
/// At most one call is in flight at a time; every operation takes
/// `&mut self`, which keeps a call's write/read pair from interleaving with
/// another call's write. Driving one client from multiple threads requires
/// external serialization.
pub struct Client {
    stream: RpcStream,
    next_id: u32,
    endpoint: Option<Endpoint>,
    config: ClientConfig,
    disconnected: bool,
    last_connect: Instant,
    buf: BytesMut,
}

impl Client {
    /// Dial `endpoint` with the default configuration.
    pub fn dial(endpoint: Endpoint) -> Result<Self> {
        Self::dial_with_config(endpoint, ClientConfig::default())
    }

    /// Dial `endpoint` with explicit configuration.
    ///
    /// The dial is bounded by `config.connect_timeout` when set.
    pub fn dial_with_config(endpoint: Endpoint, config: ClientConfig) -> Result<Self> {
        let stream = endpoint
            .connect(config.connect_timeout)
            .map_err(ClientError::Connect)?;
        Ok(Self::assemble(stream, Some(endpoint), config))
    }

    /// Wrap an already-connected stream with the default configuration.
    ///
    /// The redial address is recovered from the peer when the platform can
    /// provide one; otherwise [`reconnect`](Self::reconnect) fails with
    /// [`TransportError::UnknownPeer`].
    pub fn from_stream(stream: RpcStream) -> Self {
        Self::from_stream_with_config(stream, ClientConfig::default())
    }

    /// Wrap an already-connected stream with explicit configuration.
    pub fn from_stream_with_config(stream: RpcStream, config: ClientConfig) -> Self {
        let endpoint = stream.peer_endpoint();
        Self::assemble(stream, endpoint, config)
    }

    fn assemble(stream: RpcStream, endpoint: Option<Endpoint>, config: ClientConfig) -> Self {
        Self {
            stream,
            next_id: 1,
            endpoint,
            config,
            disconnected: false,
            last_connect: Instant::now(),
            buf: BytesMut::with_capacity(WRITE_BUFFER_CAPACITY),
        }
    }

    /// Enable or disable transparent redialing after failed operations.
    pub fn set_auto_reconnect(&mut self, auto_reconnect: bool) {
        self.config.auto_reconnect = auto_reconnect;
    }

    /// Invoke `method` remotely and wait for the correlated result.
    ///
    /// Blocks at the stream write and the subsequent read, each bounded by
    /// any configured deadline. The response id must equal the request id;
    /// a mismatch fails the call without marking the connection failed.
    pub fn call(&mut self, method: &str, params: &[Value]) -> Result<Value> {
        self.check_connected()?;

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        self.write_message(&Message::request(id, method, params.to_vec()))?;
        let (response_id, result) = self.read_response()?;

        if response_id != id {
            warn!(sent = id, received = response_id, "response id mismatch");
            return Err(ClientError::IdMismatch {
                sent: id,
                received: response_id,
            });
        }
        Ok(result)
    }

    /// Fire a one-way notification.
    ///
    /// A successful write is the only success signal; there is no
    /// acknowledgement and no way to learn whether the remote processed it.
    pub fn notify(&mut self, method: &str, params: &[Value]) -> Result<()> {
        self.check_connected()?;
        self.write_message(&Message::notification(method, params.to_vec()))
    }

    /// Re-dial the stored endpoint, replacing the stream wholesale.
    ///
    /// The disconnected flag is cleared only on success; close errors on the
    /// stale stream are ignored since it is being discarded either way.
    pub fn reconnect(&mut self) -> Result<()> {
        self.last_connect = Instant::now();
        let Some(endpoint) = self.endpoint.clone() else {
            return Err(ClientError::Connect(TransportError::UnknownPeer));
        };

        let _ = self.stream.shutdown();
        debug!(endpoint = %endpoint, "reconnecting");
        self.stream = endpoint
            .connect(self.config.connect_timeout)
            .map_err(ClientError::Connect)?;
        self.disconnected = false;
        Ok(())
    }

    /// Shut down the connection. Other client state is left untouched.
    pub fn close(&mut self) {
        let _ = self.stream.shutdown();
    }

    /// Bound both reads and writes to `timeout` from now on.
    pub fn set_deadline(&self, timeout: Duration) -> Result<()> {
        self.stream.set_timeout(Some(timeout))?;
        Ok(())
    }

    /// Bound reads to `timeout` from now on.
    pub fn set_read_deadline(&self, timeout: Duration) -> Result<()> {
        self.stream.set_read_timeout(Some(timeout))?;
        Ok(())
    }

    /// Bound writes to `timeout` from now on.
    pub fn set_write_deadline(&self, timeout: Duration) -> Result<()> {
        self.stream.set_write_timeout(Some(timeout))?;
        Ok(())
    }

    /// Gate every outgoing operation.
    ///
    /// Connected, or auto-reconnect disabled: nothing to do. Disconnected
    /// with the cooldown elapsed: one redial attempt. Inside the cooldown
    /// window: fail fast without dialing, so a dead endpoint is not hammered
    /// on every call.
    fn check_connected(&mut self) -> Result<()> {
        if !self.disconnected || !self.config.auto_reconnect {
            return Ok(());
        }
        if self.last_connect.elapsed() > self.config.reconnect_interval {
            self.reconnect()
        } else {
            Err(ClientError::NotConnected)
        }
    }

    /// Record an I/O or codec failure.
    ///
    /// Only a successful [`reconnect`](Self::reconnect) clears the flag; with
    /// auto-reconnect disabled, errors leave the client untouched so callers
    /// can drive their own retry policy.
    fn mark_failed(&mut self) {
        if self.config.auto_reconnect {
            self.disconnected = true;
        }
    }

    fn write_message(&mut self, msg: &Message) -> Result<()> {
        self.buf.clear();
        if let Err(err) = codec::write_message(&mut (&mut self.buf).writer(), msg) {
            self.mark_failed();
            return Err(ClientError::Proto(err));
        }

        let written = self.stream.write_all(&self.buf);
        if let Err(err) = written.and_then(|()| self.stream.flush()) {
            self.mark_failed();
            return Err(ClientError::Write(err));
        }
        Ok(())
    }

    fn read_response(&mut self) -> Result<(u32, Value)> {
        codec::read_response(&mut self.stream).map_err(|err| {
            self.mark_failed();
            ClientError::Proto(err)
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("next_id", &self.next_id)
            .field("disconnected", &self.disconnected)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::net::UnixStream;
    use std::thread::{self, JoinHandle};

    use wirecall_proto::{read_message, write_message, ProtoError};

    use super::*;

    /// Client over one half of a socket pair; `serve` drives the other half.
    fn paired_client<F>(serve: F) -> (Client, JoinHandle<()>)
    where
        F: FnOnce(UnixStream) + Send + 'static,
    {
        let (local, remote) = UnixStream::pair().unwrap();
        let handle = thread::spawn(move || serve(remote));
        (Client::from_stream(RpcStream::from_unix(local)), handle)
    }

    fn respond_to_one_call(mut remote: UnixStream) {
        let msg = read_message(&mut remote).unwrap();
        let Message::Request { id, method, params } = msg else {
            panic!("expected request, got {msg:?}");
        };
        assert_eq!(method, "add");
        let sum: i64 = params
            .iter()
            .map(|v| v.as_i64().expect("numeric param"))
            .sum();
        write_message(&mut remote, &Message::response(id, Value::from(sum))).unwrap();
    }

    #[test]
    fn call_returns_decoded_result() {
        let (mut client, server) = paired_client(respond_to_one_call);
        let result = client
            .call("add", &[Value::from(3), Value::from(8)])
            .unwrap();
        assert_eq!(result, Value::from(11));
        server.join().unwrap();
    }

    #[test]
    fn message_ids_increase_by_one_from_one() {
        let (mut client, server) = paired_client(|mut remote| {
            for expected_id in 1..=3u32 {
                let msg = read_message(&mut remote).unwrap();
                let Message::Request { id, .. } = msg else {
                    panic!("expected request");
                };
                assert_eq!(id, expected_id);
                write_message(&mut remote, &Message::response(id, Value::Nil)).unwrap();
            }
        });

        for _ in 0..3 {
            client.call("tick", &[]).unwrap();
        }
        server.join().unwrap();
    }

    #[test]
    fn message_id_wraps_after_u32_max() {
        let (mut client, server) = paired_client(|mut remote| {
            for _ in 0..2 {
                let Message::Request { id, .. } = read_message(&mut remote).unwrap() else {
                    panic!("expected request");
                };
                write_message(&mut remote, &Message::response(id, Value::from(id))).unwrap();
            }
        });

        client.next_id = u32::MAX;
        assert_eq!(
            client.call("tick", &[]).unwrap(),
            Value::from(u32::MAX)
        );
        assert_eq!(client.call("tick", &[]).unwrap(), Value::from(0u32));
        server.join().unwrap();
    }

    #[test]
    fn id_mismatch_fails_the_call() {
        let (mut client, server) = paired_client(|mut remote| {
            let Message::Request { id, .. } = read_message(&mut remote).unwrap() else {
                panic!("expected request");
            };
            write_message(&mut remote, &Message::response(id + 1, Value::from(11))).unwrap();
        });

        let err = client.call("add", &[]).unwrap_err();
        assert!(matches!(
            err,
            ClientError::IdMismatch {
                sent: 1,
                received: 2
            }
        ));
        server.join().unwrap();
    }

    #[test]
    fn id_mismatch_does_not_mark_connection_failed() {
        let (mut client, server) = paired_client(|mut remote| {
            let Message::Request { id, .. } = read_message(&mut remote).unwrap() else {
                panic!("expected request");
            };
            write_message(&mut remote, &Message::response(id + 1, Value::Nil)).unwrap();
        });

        client.set_auto_reconnect(true);
        let _ = client.call("x", &[]).unwrap_err();
        assert!(!client.disconnected);
        server.join().unwrap();
    }

    #[test]
    fn remote_error_wins_over_result() {
        let (mut client, server) = paired_client(|mut remote| {
            let Message::Request { id, .. } = read_message(&mut remote).unwrap() else {
                panic!("expected request");
            };
            write_message(
                &mut remote,
                &Message::Response {
                    id,
                    error: Some(Value::from("division by zero")),
                    result: Value::from(99),
                },
            )
            .unwrap();
        });

        let err = client.call("div", &[Value::from(1), Value::from(0)]).unwrap_err();
        let ClientError::Proto(ProtoError::Remote(rendered)) = err else {
            panic!("expected remote error, got {err:?}");
        };
        assert!(rendered.contains("division by zero"));
        server.join().unwrap();
    }

    #[test]
    fn malformed_reply_fails_the_call() {
        let (mut client, server) = paired_client(|mut remote| {
            let _ = read_message(&mut remote).unwrap();
            // Three elements under a response tag: wrong arity.
            rmpv::encode::write_value(
                &mut remote,
                &Value::Array(vec![Value::from(1), Value::from(1), Value::Nil]),
            )
            .unwrap();
        });

        let err = client.call("x", &[]).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Proto(ProtoError::Malformed(_))
        ));
        server.join().unwrap();
    }

    #[test]
    fn notify_writes_one_frame_and_reads_nothing() {
        let (mut client, server) = paired_client(|mut remote| {
            let msg = read_message(&mut remote).unwrap();
            assert_eq!(
                msg,
                Message::notification("log", vec![Value::from("line")])
            );
            // EOF confirms the client wrote nothing further and never
            // waited for a reply.
            assert!(matches!(
                read_message(&mut remote),
                Err(ProtoError::Read(_))
            ));
        });

        client.notify("log", &[Value::from("line")]).unwrap();
        client.close();
        server.join().unwrap();
    }

    #[test]
    fn error_without_auto_reconnect_leaves_state_untouched() {
        let (mut client, server) = paired_client(drop);
        server.join().unwrap();

        let err = client.call("x", &[]).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Proto(ProtoError::Read(_)) | ClientError::Write(_)
        ));
        assert!(!client.disconnected);
    }

    #[test]
    fn failed_call_within_cooldown_fails_fast() {
        let (mut client, server) = paired_client(drop);
        server.join().unwrap();

        client.config.auto_reconnect = true;
        client.config.reconnect_interval = Duration::from_secs(3600);

        let _ = client.call("x", &[]).unwrap_err();
        assert!(client.disconnected);

        // No dial can happen here (a socket-pair peer has no address), so a
        // fast NotConnected failure proves none was attempted.
        let err = client.call("x", &[]).unwrap_err();
        assert!(matches!(err, ClientError::NotConnected));
        let err = client.notify("x", &[]).unwrap_err();
        assert!(matches!(err, ClientError::NotConnected));
    }

    #[test]
    fn reconnect_without_known_peer_fails() {
        let (mut client, server) = paired_client(drop);
        server.join().unwrap();

        let err = client.reconnect().unwrap_err();
        assert!(matches!(
            err,
            ClientError::Connect(TransportError::UnknownPeer)
        ));
    }

    #[test]
    fn write_deadline_bounds_a_blocked_write() {
        let (local, remote) = UnixStream::pair().unwrap();
        let mut client = Client::from_stream(RpcStream::from_unix(local));
        client
            .set_write_deadline(Duration::from_millis(30))
            .unwrap();

        // The peer never reads, so the kernel buffer fills and the frame
        // write must time out instead of blocking forever.
        let payload = Value::Binary(vec![0u8; 8 * 1024 * 1024]);
        let err = client.notify("blob", &[payload]).unwrap_err();
        let ClientError::Write(io_err) = err else {
            panic!("expected write error, got {err:?}");
        };
        assert!(matches!(
            io_err.kind(),
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
        ));
        drop(remote);
    }

    #[test]
    fn deadline_setters_apply_to_stream() {
        let (mut client, server) = paired_client(|remote| {
            // Hold the connection open without responding.
            std::thread::sleep(Duration::from_millis(200));
            drop(remote);
        });

        client.set_deadline(Duration::from_millis(30)).unwrap();
        let err = client.call("never-answered", &[]).unwrap_err();
        assert!(matches!(err, ClientError::Proto(ProtoError::Read(_))));
        server.join().unwrap();
    }
}
