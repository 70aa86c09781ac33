use log::{Level, Metadata, Record};

/// Logger the dashboard app installs with `log::set_logger`.
///
/// On wasm32 lines go to the browser console; natively they go to stdout
/// with a timestamp.
pub struct AirQualityLogger;

pub static AQ_LOGGER: AirQualityLogger = AirQualityLogger;

impl log::Log for AirQualityLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} - {}", record.level(), record.args());

        #[cfg(target_arch = "wasm32")]
        gloo_console::log!(line);

        #[cfg(not(target_arch = "wasm32"))]
        println!("[{}] {}", chrono::Utc::now().to_rfc3339(), line);
    }

    fn flush(&self) {}
}
