use std::sync::Once;

/// Logger configuration.
///
/// Filter precedence: `env_filter`, then `RUST_LOG`, then `default_level`.
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "glyphclock_face=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Config with a different fallback level; `RUST_LOG` still takes precedence.
    pub fn with_level(level: log::LevelFilter) -> Self {
        Self { default_level: level, ..Self::default() }
    }
}

/// Crates whose info-level output is noise for a clock window.
const NOISY_DEPENDENCIES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`, before the glyph cache is built so that
/// its progress lines are visible.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
            for name in NOISY_DEPENDENCIES {
                builder.filter_module(name, log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        builder.format_timestamp_millis();

        // Another logger may already be installed (e.g. by a test harness).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
