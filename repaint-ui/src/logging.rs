//! Log output for `repaint-quote`.
//!
//! Log lines go to stderr so stdout carries only the quote. The console can
//! be muted, a log file attached or detached, and the level changed, all
//! after startup.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, reload};

const DEFAULT_FILTER: &str = "info,repaint_ui=debug";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

static LEVEL: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();
static CONSOLE: AtomicBool = AtomicBool::new(true);
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Local wall-clock timestamps with the UTC offset.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format(TIME_FORMAT))
    }
}

/// Writes to whatever file is in the slot; discards while it is empty.
#[derive(Clone, Copy)]
struct FileSink(&'static Mutex<Option<File>>);

struct FileSinkWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for FileSinkWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSink {
    type Writer = FileSinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileSinkWriter(lock(self.0))
    }
}

fn lock(slot: &Mutex<Option<File>>) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

/// First usable of: `env` (the `RUST_LOG` value), `configured`, the default.
fn initial_filter(
    env: Option<&str>,
    configured: Option<&str>,
) -> EnvFilter {
    env.into_iter()
        .chain(configured)
        .find_map(|directive| parse_filter(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Later calls are ignored.
///
/// `level` is an EnvFilter directive from the config file; `RUST_LOG`
/// takes precedence over it.
pub fn init_logging(level: Option<&str>) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (level_layer, handle) = reload::Layer::new(initial_filter(env.as_deref(), level));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(LocalTime)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter_fn(|_| CONSOLE.load(Ordering::Relaxed)));

    let file = tracing_subscriber::fmt::layer()
        .with_writer(FileSink(&LOG_FILE))
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_file(true)
        .with_line_number(true);

    if tracing_subscriber::registry()
        .with(level_layer)
        .with(console)
        .with(file)
        .try_init()
        .is_ok()
    {
        let _ = LEVEL.set(handle);
    }
}

/// Replaces the active filter. Accepts a bare level such as `warn` or any
/// EnvFilter directive list.
pub fn set_log_level(directive: &str) -> Result<()> {
    let handle = LEVEL.get().context("logging not yet initialized")?;
    handle
        .reload(parse_filter(directive)?)
        .context("reloading log filter")
}

/// Mutes or unmutes the stderr output. File logging is unaffected.
pub fn set_console_enabled(enabled: bool) {
    CONSOLE.store(enabled, Ordering::Relaxed);
}

/// Appends log output to `path`, replacing any open log file.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *lock(&LOG_FILE) = Some(file);
    Ok(())
}

/// Closes the current log file, if any.
pub fn disable_file_logging() {
    *lock(&LOG_FILE) = None;
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn env_directive_wins_over_config() {
        let filter = initial_filter(Some("error"), Some("warn"));
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn unparsable_env_falls_back_to_config() {
        let filter = initial_filter(Some("repaint_ui=loud"), Some("warn"));
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn nothing_configured_uses_default() {
        let filter = initial_filter(None, None);
        assert!(filter.to_string().contains("repaint_ui=debug"));
    }

    #[test]
    fn parse_filter_rejects_unknown_level() {
        let err = parse_filter("repaint_ui=loud").unwrap_err();
        assert!(err.to_string().contains("repaint_ui=loud"));
    }

    #[test]
    fn empty_file_sink_swallows_writes() {
        let slot: &'static Mutex<Option<File>> = Box::leak(Box::new(Mutex::new(None)));
        let sink = FileSink(slot);

        let written = sink.make_writer().write(b"dropped\n").unwrap();

        assert_eq!(written, 8);
    }

    #[test]
    fn file_sink_appends_to_attached_file() {
        let path = std::env::temp_dir().join(format!("repaint-log-{}.log", std::process::id()));
        let _ = fs::remove_file(&path);
        let slot: &'static Mutex<Option<File>> = Box::leak(Box::new(Mutex::new(None)));
        let sink = FileSink(slot);

        *lock(slot) = Some(File::create(&path).unwrap());
        sink.make_writer().write_all(b"quote computed\n").unwrap();
        *lock(slot) = None;

        assert_eq!(fs::read_to_string(&path).unwrap(), "quote computed\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn level_can_change_after_init() {
        init_logging(Some("warn"));

        assert!(set_log_level("debug").is_ok());
        assert!(set_log_level("repaint_ui=loud").is_err());
    }
}
