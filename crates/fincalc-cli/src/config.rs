use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,fincalc=debug,fincalc_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Scenario directory: `--store` / `FINCALC_STORE`, else `<data dir>/fincalc`.
pub fn resolve_store_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fincalc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_store_dir_wins() {
        let dir = PathBuf::from("/tmp/scenarios");
        assert_eq!(resolve_store_dir(Some(dir.clone())), dir);
    }

    #[test]
    fn test_default_store_dir_ends_in_fincalc() {
        assert!(resolve_store_dir(None).ends_with("fincalc"));
    }
}
