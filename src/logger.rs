use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber. `MACH_LOG` wins over `RUST_LOG`; without
/// either, `--verbose` selects `debug` and the default is `warn`. Output goes
/// to stderr so it never mixes with the summary on stdout. Only the first
/// call has an effect.
pub fn init_logging(verbose: bool, no_color: bool) {
    INSTALLED.get_or_init(|| install(verbose, no_color));
}

fn install(verbose: bool, no_color: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("MACH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(fallback),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, true);
        init_logging(true, true);
    }
}
