use crate::host::Notifier;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TOAST_LOG_FILE: &str = "toast.log";

pub fn append_toast_log(path: &Path, msg: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{} - {}", Local::now().to_rfc3339(), msg);
    }
}

/// Notifier used when no launcher UI is attached: messages go to the log and
/// to a timestamped toast log file.
pub struct ToastLogNotifier {
    enabled: bool,
    path: PathBuf,
}

impl ToastLogNotifier {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            path: PathBuf::from(TOAST_LOG_FILE),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

impl Notifier for ToastLogNotifier {
    fn notify(&self, message: &str) {
        if !self.enabled {
            return;
        }
        tracing::info!(toast = message);
        append_toast_log(&self.path, message);
    }
}
