use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "subcheck=debug,libsubprobe=debug,tower_http=debug,warn"
    } else {
        "subcheck=info,libsubprobe=info,tower_http=info,warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_only_changes_our_crates() {
        let quiet = default_filter(false);
        let verbose = default_filter(true);

        assert_eq!(quiet.rsplit(',').next(), Some("warn"));
        assert_eq!(verbose.rsplit(',').next(), Some("warn"));
        assert_eq!(quiet.replace("=info", "=debug"), verbose);
        assert!(EnvFilter::try_new(quiet).is_ok());
        assert!(EnvFilter::try_new(verbose).is_ok());
    }
}
