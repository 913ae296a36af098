use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum VerbosityLevel {
    Silent = 0,    // Only errors and the final summary
    Summary = 1,   // Per-company findings and misses (default)
    Detailed = 2,  // Library diagnostics
    Debug = 3,     // Everything
}

impl VerbosityLevel {
    pub fn from_verbose_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Summary,
            1 => VerbosityLevel::Detailed,
            2.. => VerbosityLevel::Debug,
        }
    }

    /// Default `tracing` filter directive for this verbosity
    pub fn tracing_directive(&self) -> &'static str {
        match self {
            VerbosityLevel::Silent | VerbosityLevel::Summary => "warn",
            VerbosityLevel::Detailed => "info",
            VerbosityLevel::Debug => "debug",
        }
    }
}

/// Console reporter for an enrichment run.
///
/// Lines are timestamped, routed through the progress bar while one is
/// active, and optionally buffered for export to a log file.
#[derive(Clone)]
pub struct EnrichmentLogger {
    verbosity: VerbosityLevel,
    progress_enabled: bool,
    progress_bar: Arc<Mutex<Option<ProgressBar>>>,
    log_buffer: Arc<Mutex<Vec<String>>>,
    log_file_path: Option<String>,
}

impl EnrichmentLogger {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            progress_enabled: true,
            progress_bar: Arc::new(Mutex::new(None)),
            log_buffer: Arc::new(Mutex::new(Vec::new())),
            log_file_path: None,
        }
    }

    pub fn with_log_file(verbosity: VerbosityLevel, log_file_path: String) -> Self {
        Self {
            log_file_path: Some(log_file_path),
            ..Self::new(verbosity)
        }
    }

    /// Logger for tests and library callers: nothing on screen, no progress bar
    pub fn silent() -> Self {
        Self {
            progress_enabled: false,
            ..Self::new(VerbosityLevel::Silent)
        }
    }

    pub fn without_progress(mut self) -> Self {
        self.progress_enabled = false;
        self
    }

    pub fn info(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Summary {
            self.print_message("INFO", message);
        }
    }

    pub fn error(&self, message: &str) {
        self.print_message("ERROR", message);
    }

    pub fn debug(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Debug {
            self.print_message("DEBUG", message);
        }
    }

    fn print_message(&self, level: &str, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let msg = format!("[{}] {}: {}", timestamp, level, message);

        if self.log_file_path.is_some() {
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg.clone());
            }
        }

        if let Ok(guard) = self.progress_bar.lock() {
            if let Some(pb) = guard.as_ref() {
                if !pb.is_hidden() {
                    pb.println(msg);
                    return;
                }
            }
        }

        eprintln!("{}", msg);
    }

    pub fn start_progress(&self, total: u64) {
        if !self.progress_enabled {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        // stderr is not a terminal: the bar would swallow println output
        if pb.is_hidden() {
            return;
        }

        if let Ok(mut guard) = self.progress_bar.lock() {
            *guard = Some(pb);
        }
    }

    pub fn set_progress_message(&self, message: &str) {
        if let Ok(guard) = self.progress_bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_message(message.to_string());
            }
        }
    }

    pub fn advance_progress(&self) {
        if let Ok(guard) = self.progress_bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.inc(1);
            }
        }
    }

    pub fn finish_progress(&self) {
        if let Ok(mut guard) = self.progress_bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    // Per-company notices

    pub fn log_load_success(&self, path: &str, count: usize) {
        self.info(&format!("Loaded {} companies from {}", count, path));
    }

    pub fn log_lookup_start(&self, tax_code: &str, url: &str) {
        self.debug(&format!("Looking up {}: {}", tax_code, url));
    }

    pub fn log_phone_found(&self, tax_code: &str, phone: &str) {
        self.info(&format!("[{}] Phone number: {}", tax_code, phone));
    }

    pub fn log_phone_missing(&self, tax_code: &str) {
        self.info(&format!("[{}] Phone number not found on page", tax_code));
    }

    pub fn log_other_contact_found(&self, tax_code: &str, value: &str) {
        self.info(&format!("[{}] Other contact info: {}", tax_code, value));
    }

    pub fn log_other_contact_missing(&self, tax_code: &str) {
        self.info(&format!("[{}] Other contact info not found on page", tax_code));
    }

    pub fn log_status_miss(&self, tax_code: &str, status: u16) {
        self.info(&format!("[{}] Lookup page returned HTTP {}, nothing extracted", tax_code, status));
    }

    pub fn log_fetch_failed(&self, tax_code: &str, error: &str) {
        self.error(&format!("[{}] Lookup failed: {}", tax_code, error));
    }

    pub fn log_export_success(&self, path: &str) {
        self.info(&format!("Export completed: {}", path));
    }

    /// Export all collected lines to the configured log file
    pub fn export_logs(&self) -> std::io::Result<()> {
        let Some(ref log_file_path) = self.log_file_path else {
            return Ok(());
        };

        if let Some(parent) = Path::new(log_file_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)?;

        if let Ok(buffer) = self.log_buffer.lock() {
            for log_entry in buffer.iter() {
                writeln!(file, "{}", log_entry)?;
            }
        }

        file.flush()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_count() {
        assert_eq!(VerbosityLevel::from_verbose_count(0), VerbosityLevel::Summary);
        assert_eq!(VerbosityLevel::from_verbose_count(1), VerbosityLevel::Detailed);
        assert_eq!(VerbosityLevel::from_verbose_count(2), VerbosityLevel::Debug);
        assert_eq!(VerbosityLevel::from_verbose_count(7), VerbosityLevel::Debug);
    }

    #[test]
    fn test_buffer_respects_verbosity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let logger = EnrichmentLogger::with_log_file(
            VerbosityLevel::from_verbose_count(0),
            path.to_string_lossy().to_string(),
        )
        .without_progress();

        logger.log_lookup_start("123", "https://masothue.com/123-abc"); // DEBUG, hidden
        logger.log_phone_found("123", "0901234567");
        logger.log_other_contact_missing("123");
        logger.log_status_miss("789", 404);
        logger.log_fetch_failed("456", "connection refused");

        logger.export_logs().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("INFO: [123] Phone number: 0901234567"));
        assert!(lines[1].contains("INFO: [123] Other contact info not found on page"));
        assert!(lines[2].contains("INFO: [789] Lookup page returned HTTP 404"));
        assert!(lines[3].contains("ERROR: [456] Lookup failed: connection refused"));
    }

    #[test]
    fn test_silent_hides_misses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let logger = EnrichmentLogger::with_log_file(
            VerbosityLevel::Silent,
            path.to_string_lossy().to_string(),
        )
        .without_progress();

        logger.log_phone_missing("123");
        logger.log_fetch_failed("456", "timeout");

        logger.export_logs().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("ERROR: [456] Lookup failed: timeout"));
    }

    #[test]
    fn test_hidden_progress_bar_is_not_installed() {
        let logger = EnrichmentLogger::new(VerbosityLevel::Summary);
        logger.start_progress(3);
        // test harness stderr is captured, so the draw target is hidden
        let installed = logger.progress_bar.lock().unwrap().is_some();
        let hidden = ProgressBar::new(1).is_hidden();
        assert_eq!(installed, !hidden);
        logger.finish_progress();
    }

    #[test]
    fn test_export_without_log_file_is_noop() {
        let logger = EnrichmentLogger::silent();
        logger.error("boom");
        assert!(logger.log_buffer.lock().unwrap().is_empty());
        assert!(logger.export_logs().is_ok());
    }
}
