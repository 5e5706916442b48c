use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, lookup_host};
use tokio::time::{Instant, timeout};
use tokio_native_tls::TlsStream;
use tracing::{debug, trace};

use crate::error::HttpError;
use crate::metrics::RequestResult;

use super::response::parse_response_head;
use super::target::Target;
use super::tls::ClientContext;

/// Size of the single read used to capture a response.
pub const RESPONSE_BUFFER_SIZE: usize = 4096;

enum Transport {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Transport {
    async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        match self {
            Transport::Plain(stream) => stream.write_all(buf).await,
            Transport::Tls(stream) => stream.write_all(buf).await,
        }
    }

    async fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Transport::Plain(stream) => stream.read(buf).await,
            Transport::Tls(stream) => stream.read(buf).await,
        }
    }

    async fn shutdown(&mut self) -> std::io::Result<()> {
        match self {
            Transport::Plain(stream) => stream.shutdown().await,
            Transport::Tls(stream) => stream.shutdown().await,
        }
    }
}

/// One worker's socket to a target endpoint, plain or TLS-wrapped.
pub struct Connection {
    transport: Option<Transport>,
    endpoint: Target,
    timeout: Duration,
    worker_id: usize,
}

impl Connection {
    /// Resolves the target host, opens a TCP socket and, for `https`,
    /// completes the TLS handshake. Every step is bounded by `io_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error on DNS failure, TCP connect failure, TLS handshake
    /// failure or timeout. No retries are attempted.
    pub async fn connect(
        target: &Target,
        context: &ClientContext,
        io_timeout: Duration,
        worker_id: usize,
    ) -> Result<Self, HttpError> {
        let addr = resolve(target, io_timeout).await?;
        let stream = bounded(io_timeout, "connecting", TcpStream::connect(addr))
            .await?
            .map_err(|err| HttpError::Connect { addr, source: err })?;
        if let Err(err) = stream.set_nodelay(true) {
            trace!("Failed to set TCP_NODELAY: {}", err);
        }

        let transport = if target.is_tls() {
            let connector = context.tls_connector()?;
            let tls = bounded(
                io_timeout,
                "negotiating TLS",
                connector.connect(target.host(), stream),
            )
            .await?
            .map_err(|err| HttpError::TlsHandshake {
                host: target.host().to_owned(),
                source: err,
            })?;
            Transport::Tls(Box::new(tls))
        } else {
            Transport::Plain(stream)
        };

        debug!(worker = worker_id, %addr, url = %target, "Connected.");
        Ok(Self {
            transport: Some(transport),
            endpoint: target.clone(),
            timeout: io_timeout,
            worker_id,
        })
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Whether this connection is open and points at the same endpoint.
    #[must_use]
    pub fn serves(&self, target: &Target) -> bool {
        self.is_open() && self.endpoint.same_endpoint(target)
    }

    /// Writes one prepared request and performs a single bounded read.
    ///
    /// The timer covers exactly the write and the read. Transfer failures are
    /// reported in the returned result (status 0 plus an error) and close the
    /// connection, as does a response that cannot be followed by another
    /// request on the same socket.
    pub async fn send(&mut self, target: &Target, request: &[u8]) -> RequestResult {
        let Some(transport) = self.transport.as_mut() else {
            return RequestResult::failed(
                target.url(),
                self.worker_id,
                Duration::ZERO,
                &HttpError::ConnectionClosed,
            );
        };

        let io_timeout = self.timeout;
        let mut buf = [0u8; RESPONSE_BUFFER_SIZE];
        let started = Instant::now();
        let exchange = async {
            bounded(io_timeout, "writing the request", transport.write_all(request))
                .await?
                .map_err(|err| HttpError::Write { source: err })?;
            bounded(io_timeout, "reading the response", transport.read(&mut buf))
                .await?
                .map_err(|err| HttpError::Read { source: err })
        };
        let outcome = exchange.await;
        let latency = started.elapsed();

        let parsed = outcome.and_then(|read| match read {
            0 => Err(HttpError::EmptyResponse),
            n => parse_response_head(buf.get(..n).unwrap_or_default()),
        });

        match parsed {
            Ok(head) => {
                if !head.reusable {
                    trace!(worker = self.worker_id, "Response not reusable; closing connection.");
                    self.close().await;
                }
                RequestResult::completed(target.url(), self.worker_id, head.status, latency)
            }
            Err(err) => {
                debug!(worker = self.worker_id, url = %target, "Transfer failed: {}", err);
                self.close().await;
                RequestResult::failed(target.url(), self.worker_id, latency, &err)
            }
        }
    }

    /// Shuts the transport down gracefully (TLS close_notify first) and
    /// releases the socket. Safe to call more than once.
    pub async fn close(&mut self) {
        let Some(mut transport) = self.transport.take() else {
            return;
        };
        match timeout(self.timeout, transport.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => trace!(worker = self.worker_id, "Shutdown error: {}", err),
            Err(_) => trace!(worker = self.worker_id, "Shutdown timed out."),
        }
        drop(transport);
    }
}

async fn resolve(target: &Target, io_timeout: Duration) -> Result<SocketAddr, HttpError> {
    let host = target.host();
    let port = target.port();
    let mut addrs = bounded(io_timeout, "resolving the host", lookup_host((host, port)))
        .await?
        .map_err(|err| HttpError::ResolveHost {
            host: host.to_owned(),
            port,
            source: err,
        })?;
    addrs.next().ok_or_else(|| HttpError::NoAddressesResolved {
        host: host.to_owned(),
    })
}

async fn bounded<F, T>(limit: Duration, stage: &'static str, future: F) -> Result<T, HttpError>
where
    F: Future<Output = T>,
{
    timeout(limit, future)
        .await
        .map_err(|_elapsed| HttpError::Timeout {
            stage,
            timeout_ms: limit.as_millis(),
        })
}
