use std::sync::Once;

use env_logger::{Builder, Env, WriteStyle};

/// Logger setup for the framebuffer demo.
///
/// The base filter comes from `RUST_LOG`, or `info` when unset (bring-up
/// steps and the final frame count). `filter` directives are applied on top.
/// Nothing is logged per frame.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"fbgl_engine::device=debug"`.
    pub filter: Option<String>,
    /// Color output. Serial consoles usually want [`WriteStyle::Never`].
    pub write_style: WriteStyle,
    /// Prefix records with a timestamp. Off by default: boards without an
    /// RTC boot at the epoch, which makes wall-clock stamps misleading.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: WriteStyle::Auto,
            timestamps: false,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
        if let Some(filter) = &config.filter {
            builder.parse_filters(filter);
        }
        builder.write_style(config.write_style);
        if !config.timestamps {
            builder.format_timestamp(None);
        }

        // A test harness may already own the global logger.
        if builder.try_init().is_ok() {
            log::debug!("logger installed");
        }
    });
}
