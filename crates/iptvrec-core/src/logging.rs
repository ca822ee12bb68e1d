use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log severity level as shown in the output pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.pad(s)
    }
}

/// A log record captured for the output pane.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Records waiting to be moved into the transcript by the UI thread.
pub type LogBuffer = Arc<Mutex<VecDeque<LogEntry>>>;

pub fn new_log_buffer(capacity: usize) -> LogBuffer {
    Arc::new(Mutex::new(VecDeque::with_capacity(capacity)))
}

/// Take every pending record out of the buffer, oldest first.
pub fn drain(buffer: &LogBuffer) -> Vec<LogEntry> {
    match buffer.lock() {
        Ok(mut buf) => buf.drain(..).collect(),
        Err(_) => Vec::new(),
    }
}

const FILE_PREFIX: &str = "iptvrec.log";
const PENDING_CAPACITY: usize = 1000;
const RETENTION: Duration = Duration::from_secs(7 * 86_400);

/// Directory for rolling log files.
///
/// `IPTVREC_LOG_DIR` wins; otherwise `~/Library/Logs/iptvrec` on macOS and
/// `<data dir>/iptvrec/logs` elsewhere.
pub fn log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("IPTVREC_LOG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return home.join("Library").join("Logs").join("iptvrec");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Some(data) = dirs::data_dir() {
            return data.join("iptvrec").join("logs");
        }
    }

    PathBuf::from("logs")
}

/// Delete rotated `iptvrec.log*` files last modified before `cutoff`.
/// Other files in the directory are never touched.
fn prune_rotated_logs(dir: &Path, cutoff: SystemTime) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    let mut removed = 0;
    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().starts_with(FILE_PREFIX) {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map(|modified| modified < cutoff)
            .unwrap_or(false);
        if stale && std::fs::remove_file(entry.path()).is_ok() {
            removed += 1;
        }
    }
    removed
}

/// Layer that copies each event into a [`LogBuffer`], dropping the oldest
/// record once `capacity` is reached.
struct TranscriptLayer {
    buffer: LogBuffer,
    capacity: usize,
}

impl<S: tracing::Subscriber> Layer<S> for TranscriptLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: (*event.metadata().level()).into(),
            target: event.metadata().target().to_string(),
            message: visitor.finish(),
        };

        if let Ok(mut buf) = self.buffer.lock() {
            if buf.len() >= self.capacity {
                buf.pop_front();
            }
            buf.push_back(entry);
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message, self.fields.is_empty()) {
            (Some(msg), true) => msg,
            (Some(msg), false) => format!("{} {}", msg, self.fields.join(" ")),
            (None, _) => self.fields.join(" "),
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Install the global subscriber and return the buffer feeding the output
/// pane.
///
/// Filter: `IPTVREC_LOG`, then `RUST_LOG`, then `info`. Files roll daily in
/// [`log_dir`] and are kept for a week. Nothing is written to stdout, which
/// belongs to the alternate screen while the window is up.
pub fn init() -> LogBuffer {
    let buffer = new_log_buffer(PENDING_CAPACITY);

    let filter = EnvFilter::try_from_env("IPTVREC_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("warning: cannot create log directory {}: {}", dir.display(), e);
    }
    let pruned = prune_rotated_logs(&dir, SystemTime::now() - RETENTION);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(&dir, FILE_PREFIX))
        .with_ansi(false)
        .with_target(true);

    let transcript_layer = TranscriptLayer {
        buffer: buffer.clone(),
        capacity: PENDING_CAPACITY,
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(transcript_layer)
        .try_init()
    {
        eprintln!("warning: logging already initialised: {}", e);
    }

    tracing::debug!(dir = %dir.display(), pruned, "logging initialised");
    buffer
}
