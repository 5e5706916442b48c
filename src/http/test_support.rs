//! Blocking HTTP/1.1 server on a background thread for client and scheduler
//! tests.
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

const ACCEPT_POLL: Duration = Duration::from_millis(5);
const CLIENT_READ_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServerMode {
    /// `200 OK` with a sized body; the connection stays open.
    KeepAlive,
    /// `200 OK` with `Connection: close`, then the socket is closed.
    Close,
    /// Accepts and reads requests but never answers.
    Silent,
}

pub(crate) struct TestServer {
    addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
    stop: Arc<AtomicBool>,
}

impl TestServer {
    pub(crate) fn start(mode: ServerMode) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let connections = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let accept_connections = Arc::clone(&connections);
        let accept_requests = Arc::clone(&requests);
        let accept_stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !accept_stop.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        accept_connections.fetch_add(1, Ordering::Relaxed);
                        let requests = Arc::clone(&accept_requests);
                        let stop = Arc::clone(&accept_stop);
                        thread::spawn(move || serve(stream, mode, &requests, &stop));
                    }
                    Err(err) if err.kind() == ErrorKind::WouldBlock => thread::sleep(ACCEPT_POLL),
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            addr,
            connections,
            requests,
            stop,
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn connections(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }

    /// Raw request heads and bodies in arrival order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// A port with nothing listening on it.
pub(crate) fn closed_port_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

fn serve(mut stream: TcpStream, mode: ServerMode, requests: &Mutex<Vec<String>>, stop: &AtomicBool) {
    if stream.set_nonblocking(false).is_err()
        || stream.set_read_timeout(Some(CLIENT_READ_TIMEOUT)).is_err()
    {
        return;
    }
    let mut pending: Vec<u8> = Vec::new();
    while !stop.load(Ordering::Relaxed) {
        let Some(request) = read_request(&mut stream, &mut pending) else {
            return;
        };
        requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let response: &[u8] = match mode {
            ServerMode::KeepAlive => b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok",
            ServerMode::Close => b"HTTP/1.1 200 OK\r\nConnection: close\r\nContent-Length: 2\r\n\r\nok",
            ServerMode::Silent => continue,
        };
        if stream.write_all(response).is_err() {
            return;
        }
        if mode == ServerMode::Close {
            drop(stream.shutdown(std::net::Shutdown::Both));
            return;
        }
    }
}

fn read_request(stream: &mut TcpStream, pending: &mut Vec<u8>) -> Option<String> {
    let mut chunk = [0u8; 1024];
    loop {
        if let Some(head_end) = find(pending, b"\r\n\r\n") {
            let body_start = head_end.saturating_add(4);
            let head = String::from_utf8_lossy(pending.get(..head_end)?).into_owned();
            let body_len = content_length(&head);
            let total = body_start.saturating_add(body_len);
            if pending.len() >= total {
                let request = String::from_utf8_lossy(pending.get(..total)?).into_owned();
                pending.drain(..total);
                return Some(request);
            }
        }
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return None,
            Ok(read) => pending.extend_from_slice(chunk.get(..read)?),
        }
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
