//! Raw HTTP/1.1 client over plain and TLS sockets, and the worker pool that
//! drives it.
mod connection;
mod request;
mod response;
pub mod sender;
mod target;
mod tls;

#[cfg(test)]
mod test_support;

pub use connection::{Connection, RESPONSE_BUFFER_SIZE};
pub use request::{Header, PreparedRequest};
pub use response::{ResponseHead, parse_response_head, parse_status_code};
pub use sender::{LoadOutcome, ProgressUpdate, run_load};
pub use target::{Scheme, Target};
pub use tls::ClientContext;
