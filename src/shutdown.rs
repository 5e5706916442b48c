use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use tracing::{info, warn};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Cooperative stop signal shared by the orchestrator and every worker.
///
/// Workers read it at each loop boundary and await [`StopFlag::stopped`]
/// while idle, so a stop also cuts ramp-up and rate-limit pauses short.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<StopState>);

#[derive(Debug, Default)]
struct StopState {
    stopped: AtomicBool,
    notify: Notify,
}

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.stopped.store(true, Ordering::Release);
        self.0.notify.notify_waiters();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.stopped.load(Ordering::Acquire)
    }

    /// Resolves once [`StopFlag::stop`] has been called on any clone.
    pub async fn stopped(&self) {
        // Registered before the check so a concurrent stop cannot be missed.
        let notified = self.0.notify.notified();
        if self.is_stopped() {
            return;
        }
        notified.await;
    }
}

/// Flips `stop` on Ctrl+C or SIGTERM. The task ends after the first signal;
/// abort it once the run has finished.
pub fn setup_signal_stop_handler(stop: &StopFlag) -> tokio::task::JoinHandle<()> {
    let stop = stop.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        warn!("Failed to listen for Ctrl+C: {}", err);
                        return;
                    }
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {}
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", err);
                return;
            }
        }

        info!("Interrupted, stopping workers.");
        stop.stop();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use std::time::Duration;

    #[test]
    fn stop_flag_is_shared_between_clones() -> AppResult<()> {
        let flag = StopFlag::new();
        let observer = flag.clone();
        if observer.is_stopped() {
            return Err(AppError::validation("Flag should start cleared"));
        }
        flag.stop();
        if observer.is_stopped() {
            Ok(())
        } else {
            Err(AppError::validation("Clone did not observe stop"))
        }
    }

    #[test]
    fn stopped_wakes_pending_waiters() -> AppResult<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
        runtime.block_on(async {
            let flag = StopFlag::new();
            let waiter = {
                let flag = flag.clone();
                tokio::spawn(async move { flag.stopped().await })
            };
            tokio::time::sleep(Duration::from_millis(10)).await;
            flag.stop();
            tokio::time::timeout(Duration::from_secs(2), waiter)
                .await
                .map_err(|_| AppError::validation("Waiter was not woken by stop"))?
                .map_err(|err| AppError::validation(format!("Waiter failed: {}", err)))?;
            tokio::time::timeout(Duration::from_millis(100), flag.stopped())
                .await
                .map_err(|_| AppError::validation("Stopped flag should resolve at once"))
        })
    }

    #[test]
    fn signal_handler_can_be_aborted() -> AppResult<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
        runtime.block_on(async {
            let flag = StopFlag::new();
            let handle = setup_signal_stop_handler(&flag);
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.abort();
            match handle.await {
                Err(err) if err.is_cancelled() => {}
                Err(err) => {
                    return Err(AppError::validation(format!("Unexpected join error: {}", err)));
                }
                Ok(()) => return Err(AppError::validation("Handler ended without a signal")),
            }
            if flag.is_stopped() {
                Err(AppError::validation("Abort must not flip the flag"))
            } else {
                Ok(())
            }
        })
    }
}
