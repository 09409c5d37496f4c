//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//! In the browser build, events go to the devtools console instead.

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Result;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::EnvFilter;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FILTER: &str = "info,convtrack=debug,convtrack_core=debug";

/// Writer that is either a file or stderr (used when file clone fails).
#[cfg(not(target_arch = "wasm32"))]
enum FileOrStderr {
    File(std::fs::File),
    Stderr,
}

#[cfg(not(target_arch = "wasm32"))]
impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Default log file: `~/.local/state/convtrack/convtrack.log`.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("convtrack")?;
    Ok(xdg_dirs.get_state_home().join("convtrack.log"))
}

/// Initialize structured logging to the default log file.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() -> Result<()> {
    init_logging_at(&default_log_path()?)
}

/// Initialize structured logging, appending to `log_file_path`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging_at(log_file_path: &Path) -> Result<()> {
    if let Some(log_dir) = log_file_path.parent() {
        fs::create_dir_all(log_dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    struct FileMakeWriter(std::fs::File);

    impl<'a> MakeWriter<'a> for FileMakeWriter {
        type Writer = FileOrStderr;

        fn make_writer(&'a self) -> Self::Writer {
            self.0
                .try_clone()
                .map(FileOrStderr::File)
                .unwrap_or(FileOrStderr::Stderr)
        }
    }

    let writer: BoxMakeWriter = BoxMakeWriter::new(FileMakeWriter(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    tracing::info!("convtrack logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Console method an event is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Log,
    Warn,
}

impl ConsoleMethod {
    pub fn for_level(level: &tracing::Level) -> Self {
        if *level <= tracing::Level::WARN {
            ConsoleMethod::Warn
        } else {
            ConsoleMethod::Log
        }
    }
}

/// Buffers one formatted event; the sink emits it as a single console line on drop.
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buf: Vec<u8>,
    sink: fn(ConsoleMethod, &str),
}

impl ConsoleWriter {
    fn line(&self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        (!line.is_empty()).then(|| line.to_string())
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = self.line() {
            (self.sink)(self.method, &line);
        }
    }
}

/// Routes WARN and ERROR to `console.warn`, the rest to `console.log`.
pub struct ConsoleMakeWriter {
    sink: fn(ConsoleMethod, &str),
}

impl ConsoleMakeWriter {
    pub fn new(sink: fn(ConsoleMethod, &str)) -> Self {
        Self { sink }
    }

    fn writer(&self, method: ConsoleMethod) -> ConsoleWriter {
        ConsoleWriter {
            method,
            buf: Vec::new(),
            sink: self.sink,
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(ConsoleMethod::Log)
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        self.writer(ConsoleMethod::for_level(meta.level()))
    }
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
fn browser_console(method: ConsoleMethod, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match method {
        ConsoleMethod::Log => web_sys::console::log_1(&value),
        ConsoleMethod::Warn => web_sys::console::warn_1(&value),
    }
}

/// Panic messages and `tracing` events to the browser console. Safe to call twice.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub fn init_console_logging() {
    console_error_panic_hook::set_once();
    // No clock on wasm32-unknown-unknown: timestamps would panic.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(ConsoleMakeWriter::new(browser_console))
        .with_ansi(false)
        .without_time()
        .try_init();
}
