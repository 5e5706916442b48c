use std::fmt;

use once_cell::sync::OnceCell;
use tokio_native_tls::TlsConnector;
use tracing::{debug, warn};

use crate::error::HttpError;

/// Process-side network state shared by every worker of a run.
///
/// The TLS connector is built at most once; `setup` and `teardown` bracket a
/// run and are no-ops when repeated.
pub struct ClientContext {
    insecure: bool,
    connector: OnceCell<TlsConnector>,
}

impl ClientContext {
    #[must_use]
    pub const fn new(insecure: bool) -> Self {
        Self {
            insecure,
            connector: OnceCell::new(),
        }
    }

    /// Eagerly builds the TLS connector.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform TLS backend cannot be initialized.
    pub fn setup(&self) -> Result<(), HttpError> {
        self.tls_connector().map(|_| ())
    }

    /// Returns the shared connector, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform TLS backend cannot be initialized.
    pub fn tls_connector(&self) -> Result<&TlsConnector, HttpError> {
        self.connector
            .get_or_try_init(|| build_connector(self.insecure))
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.connector.get().is_some()
    }

    pub fn teardown(&mut self) {
        if self.connector.take().is_some() {
            debug!("Released TLS connector.");
        }
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("insecure", &self.insecure)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

fn build_connector(insecure: bool) -> Result<TlsConnector, HttpError> {
    let mut builder = native_tls::TlsConnector::builder();
    if insecure {
        warn!("TLS certificate and hostname verification is disabled (--insecure).");
        builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }
    let connector = builder
        .build()
        .map_err(|err| HttpError::TlsSetup { source: err })?;
    debug!(insecure, "Built TLS connector.");
    Ok(TlsConnector::from(connector))
}
