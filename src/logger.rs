use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. The terminal itself is the game
/// screen, so nothing is ever written to stdout from here.
pub struct Logger {
    sink: Mutex<Option<File>>,
}

impl Logger {
    fn new(sink: Option<File>) -> Self {
        Self { sink: Mutex::new(sink) }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let Ok(mut guard) = self.sink.lock() else {
            return;
        };
        let Some(sink) = guard.as_mut() else {
            return;
        };

        let _ = writeln!(sink, "{}", format_line(file, line, message));
    }
}

fn format_line(file: &str, line: u32, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
}

pub fn init_logger(path: Option<&Path>) -> io::Result<()> {
    let sink = match path {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    LOGGER.get_or_init(|| Logger::new(sink));
    Ok(())
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
