use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported scheme '{scheme}' in '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("URL '{url}' has no host.")]
    MissingHost { url: String },
    #[error("Failed to resolve {host}:{port} ({source})")]
    ResolveHost {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("No addresses resolved for {host}.")]
    NoAddressesResolved { host: String },
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Timed out after {timeout_ms}ms while {stage}.")]
    Timeout {
        stage: &'static str,
        timeout_ms: u128,
    },
    #[error("Failed to build TLS connector: {source}")]
    TlsSetup {
        #[source]
        source: native_tls::Error,
    },
    #[error("TLS handshake with {host} failed: {source}")]
    TlsHandshake {
        host: String,
        #[source]
        source: native_tls::Error,
    },
    #[error("Failed to write request: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read response: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
    #[error("Empty response or read error")]
    EmptyResponse,
    #[error("Malformed status line")]
    MalformedStatusLine,
    #[error("Connection is closed.")]
    ConnectionClosed,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
