use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        println!("{}", self.format_line(file, line, message));
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// Messages emitted before [`init_logger`] are dropped, so the engine stays
/// silent when embedded without a logger (unit tests, benches).
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::is_initialized() {
            $crate::logger::log(file!(), line!(), &format!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories_from_file() {
        let logger = Logger::new(None);
        let line = logger.format_line("src/games/snake/coordinator.rs", 42, "moved");
        assert!(line.ends_with("[coordinator.rs:42] moved"));
    }

    #[test]
    fn test_format_line_includes_prefix() {
        let logger = Logger::new(Some("Runner".to_string()));
        let line = logger.format_line("C:\\work\\main.rs", 7, "started");
        assert!(line.contains("[Runner][main.rs:7] started"));
    }
}
