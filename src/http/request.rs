use std::sync::Arc;

use http::Method;

use super::target::Target;

pub(crate) const USER_AGENT: &str = concat!("mach/", env!("CARGO_PKG_VERSION"));

/// A configured request header, sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Serialized HTTP/1.1 request bytes for one target, built once per run and
/// shared by every worker.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    bytes: Arc<[u8]>,
}

impl PreparedRequest {
    #[must_use]
    pub fn build(method: &Method, target: &Target, headers: &[Header], body: Option<&[u8]>) -> Self {
        let body = body.filter(|bytes| !bytes.is_empty());
        let mut out: Vec<u8> = Vec::with_capacity(256);

        push_line(&mut out, &[method.as_str(), " ", target.path(), " HTTP/1.1"]);
        push_line(&mut out, &["Host: ", target.authority()]);
        push_line(&mut out, &["Connection: keep-alive"]);
        push_line(&mut out, &["User-Agent: ", USER_AGENT]);
        for header in headers {
            push_line(&mut out, &[header.name.as_str(), ": ", header.value.as_str()]);
        }
        if let Some(body) = body {
            let length = body.len().to_string();
            push_line(&mut out, &["Content-Length: ", length.as_str()]);
        }
        out.extend_from_slice(b"\r\n");
        if let Some(body) = body {
            out.extend_from_slice(body);
        }

        Self {
            bytes: Arc::from(out),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn push_line(out: &mut Vec<u8>, parts: &[&str]) {
    for part in parts {
        out.extend_from_slice(part.as_bytes());
    }
    out.extend_from_slice(b"\r\n");
}
