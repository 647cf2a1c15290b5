use env_logger::Env;

/// Installs the global logger once. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Tagged logger: the tag becomes the `log` target.
#[derive(Clone)]
pub struct Logger {
    tag: &'static str,
}

impl Logger {
    pub fn new(tag: &'static str) -> Self {
        Self { tag }
    }

    #[inline]
    pub fn info(&self, msg: impl AsRef<str>) {
        log::info!(target: self.tag, "{}", msg.as_ref());
    }

    #[inline]
    pub fn debug(&self, msg: impl AsRef<str>) {
        log::debug!(target: self.tag, "{}", msg.as_ref());
    }

    #[inline]
    pub fn warn(&self, msg: impl AsRef<str>) {
        log::warn!(target: self.tag, "{}", msg.as_ref());
    }

    #[inline]
    pub fn error(&self, msg: impl AsRef<str>) {
        log::error!(target: self.tag, "{}", msg.as_ref());
    }

    #[inline]
    pub fn debug_enabled(&self) -> bool {
        log::log_enabled!(target: self.tag, log::Level::Debug)
    }
}
