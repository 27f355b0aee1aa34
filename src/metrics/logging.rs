use std::io;

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

use crate::args::CaptureMode;

use super::types::RequestOutcome;

pub type FileLogSink = LogSink<BufWriter<File>>;

/// Append-only text destination shared by all request tasks.
///
/// Each call writes complete lines under the lock, so concurrent lines are
/// never interleaved.
#[derive(Debug)]
pub struct LogSink<W> {
    capture: CaptureMode,
    writer: Mutex<W>,
}

impl<W> LogSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    #[must_use]
    pub fn new(writer: W, capture: CaptureMode) -> Self {
        Self {
            capture,
            writer: Mutex::new(writer),
        }
    }

    #[must_use]
    pub const fn capture(&self) -> CaptureMode {
        self.capture
    }

    /// Writes the per-request line for `outcome`, if the capture mode wants one.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub async fn record(&self, url: &str, outcome: &RequestOutcome) -> io::Result<()> {
        match format_log_line(self.capture, url, outcome) {
            Some(line) => self.append_line(&line).await,
            None => Ok(()),
        }
    }

    /// Appends one line regardless of capture mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub async fn append_line(&self, line: &str) -> io::Result<()> {
        let mut buffer = String::with_capacity(line.len().saturating_add(1));
        buffer.push_str(line);
        buffer.push('\n');
        let mut writer = self.writer.lock().await;
        writer.write_all(buffer.as_bytes()).await
    }

    /// Appends a block of lines as one write.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub async fn append_lines(&self, lines: &[String]) -> io::Result<()> {
        let mut buffer = String::new();
        for line in lines {
            buffer.push_str(line);
            buffer.push('\n');
        }
        let mut writer = self.writer.lock().await;
        writer.write_all(buffer.as_bytes()).await
    }

    /// # Errors
    ///
    /// Returns an error if the underlying writer fails to flush.
    pub async fn flush(&self) -> io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.flush().await
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl FileLogSink {
    /// Creates (or truncates) the output file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub async fn create(path: &std::path::Path, capture: CaptureMode) -> io::Result<Self> {
        let file = File::create(path).await?;
        Ok(Self::new(BufWriter::new(file), capture))
    }
}

/// Renders the per-request log line, or `None` when capture is off.
#[must_use]
pub fn format_log_line(capture: CaptureMode, url: &str, outcome: &RequestOutcome) -> Option<String> {
    let timestamp = outcome.started_at.format("%H:%M:%S%.3f");
    let elapsed_ms = outcome.elapsed.as_millis();
    match capture {
        CaptureMode::None => None,
        CaptureMode::Simple => Some(format!(
            "\"{}: {}\": {}:, {}ms",
            timestamp, url, outcome.status_code, elapsed_ms
        )),
        CaptureMode::Full => Some(format!(
            "\"{}: {}\": {}: \"{}\", {}ms",
            timestamp, url, outcome.status_code, outcome.message, elapsed_ms
        )),
    }
}
