use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use url::{Host, Url};

use crate::error::HttpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// A parsed `scheme://host[:port][/path]` target.
///
/// The original string is kept so results can report exactly which
/// configured URL was exercised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    raw: Arc<str>,
    scheme: Scheme,
    host: String,
    port: u16,
    path: String,
    authority: String,
}

impl Target {
    /// Parses a target URL, applying the scheme's default port and `/` for an
    /// empty path.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is malformed, uses a scheme other than
    /// `http`/`https`, or has no host.
    pub fn parse(raw: &str) -> Result<Self, HttpError> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed).map_err(|err| HttpError::InvalidUrl {
            url: trimmed.to_owned(),
            source: err,
        })?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                return Err(HttpError::UnsupportedScheme {
                    url: trimmed.to_owned(),
                    scheme: other.to_owned(),
                });
            }
        };

        let (host, host_header) = match url.host() {
            Some(Host::Domain(domain)) => (domain.to_owned(), domain.to_owned()),
            Some(Host::Ipv4(addr)) => (addr.to_string(), addr.to_string()),
            Some(Host::Ipv6(addr)) => (addr.to_string(), format!("[{}]", addr)),
            None => {
                return Err(HttpError::MissingHost {
                    url: trimmed.to_owned(),
                });
            }
        };
        if host.is_empty() {
            return Err(HttpError::MissingHost {
                url: trimmed.to_owned(),
            });
        }

        let port = url.port().unwrap_or_else(|| scheme.default_port());
        let authority = if port == scheme.default_port() {
            host_header
        } else {
            format!("{}:{}", host_header, port)
        };

        let mut path = if url.path().is_empty() {
            "/".to_owned()
        } else {
            url.path().to_owned()
        };
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self {
            raw: Arc::from(trimmed),
            scheme,
            host,
            port,
            path,
            authority,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Shared handle to the original URL string.
    #[must_use]
    pub fn url(&self) -> Arc<str> {
        Arc::clone(&self.raw)
    }

    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    #[must_use]
    pub const fn is_tls(&self) -> bool {
        matches!(self.scheme, Scheme::Https)
    }

    /// Host used for DNS resolution and TLS SNI (no IPv6 brackets).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Request target: path plus query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of the `Host` header.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Whether a connection opened for `self` can carry requests for `other`.
    #[must_use]
    pub fn same_endpoint(&self, other: &Target) -> bool {
        self.scheme == other.scheme && self.port == other.port && self.host == other.host
    }
}

impl FromStr for Target {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
