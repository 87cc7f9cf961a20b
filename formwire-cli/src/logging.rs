use std::sync::Once;

use formwire_compiler::config::LoggingConfig;

static INIT: Once = Once::new();

/// Installs `env_logger` at the configured level. Later calls are ignored.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug".to_string() } else { config.level.to_ascii_lowercase() };

    INIT.call_once(|| {
        let _ = env_logger::Builder::new()
            .parse_filters(&level)
            .format_timestamp(None)
            .try_init();
    });
}
