use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "dvd_bounce=debug,wgpu=warn"). When unset, `RUST_LOG` is consulted.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Raises the fallback level from info to debug for the demo crates.
    pub debug: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            debug: false,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(&config, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized with filter {filter:?}");
    });
}

/// Explicit filter, then `RUST_LOG`, then a level picked from `debug`.
fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> String {
    if let Some(filter) = &config.env_filter {
        return filter.clone();
    }
    if let Some(filter) = rust_log.filter(|f| !f.trim().is_empty()) {
        return filter;
    }
    if config.debug {
        "info,dvd_framework=debug,dvd_bounce=debug".to_owned()
    } else {
        "info".to_owned()
    }
}
