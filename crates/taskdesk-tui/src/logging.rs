/*
[INPUT]:  Log configuration and the chosen sink (stderr or the TUI log panel)
[OUTPUT]: Installed tracing subscriber, in-memory log buffer, file writer guard
[POS]:    Logging layer - tracing setup shared by every subcommand
[UPDATE]: When changing log sinks or formats
[UPDATE]: 2026-10-13 Move LogBuffer out of the TUI runtime; add file sink
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;

pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<Mutex<LogBuffer>>;

/// Bounded ring of formatted log lines
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn handle(capacity: usize) -> LogBufferHandle {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    #[cfg(test)]
    fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// The last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(start).cloned().collect()
    }
}

pub fn lock_buffer(buffer: &LogBufferHandle) -> MutexGuard<'_, LogBuffer> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

/// Splits written bytes into lines and appends them to the buffer
pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            lock_buffer(&self.buffer).push_line(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            lock_buffer(&self.buffer).push_line(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

/// Where interactive log output goes
pub enum LogSink {
    Stderr,
    Buffer(LogBufferHandle),
}

/// Keeps the non-blocking file writer alive; drop it last
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

pub fn init_tracing(config: &LogConfig, sink: LogSink) -> Result<LogGuard> {
    let filter = EnvFilter::try_new(&config.level).context("invalid log level")?;

    let (file_layer, file_guard) = match config.file.as_deref() {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    let installed = match sink {
        LogSink::Stderr => registry
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
        LogSink::Buffer(buffer) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(LogWriterFactory::new(buffer)),
            )
            .try_init(),
    };
    installed
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;

    Ok(LogGuard { _file: file_guard })
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .with_context(|| format!("create log directory {}", directory.display()))?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
