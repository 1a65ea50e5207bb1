use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

pub fn init() {
    let mut logger = LOGGER.lock().unwrap();
    if logger.is_none()
        && let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open("studysheet.log")
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    write_line("info", message);
}

pub fn log_error(message: &str) {
    write_line("error", message);
}

fn write_line(level: &str, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_mut() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(logger, "[{}] [{}] {}", timestamp, level, message);
    }
}
