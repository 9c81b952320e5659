//! Progress notifications
//!
//! Workloads announce themselves on an unbounded channel; a single printer
//! task drains it in FIFO order and stops once every sender is dropped.

use std::fmt;
use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::bench::workload::WorkloadKind;
use crate::report::{paint, Palette};

/// "Workload K/N starting" notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressMessage {
    /// 1-based position in the suite
    pub index: usize,
    /// Number of workloads in the suite
    pub total: usize,
    pub kind: WorkloadKind,
}

impl ProgressMessage {
    pub fn starting(kind: WorkloadKind) -> Self {
        Self {
            index: kind.position(),
            total: WorkloadKind::ALL.len(),
            kind,
        }
    }
}

impl fmt::Display for ProgressMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Workload {}/{}: {}...",
            self.kind.icon(),
            self.index,
            self.total,
            self.kind.name()
        )
    }
}

pub type ProgressSender = mpsc::UnboundedSender<ProgressMessage>;
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressMessage>;

/// Create the progress channel
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// Send a notification; a closed printer is not an error for the workload
pub fn notify(tx: &ProgressSender, message: ProgressMessage) {
    if tx.send(message).is_err() {
        debug!("Progress printer already gone, dropping notification");
    }
}

/// Where progress lines are written
pub type ProgressSink = Box<dyn Write + Send>;

/// Consumer side of the progress channel.
///
/// Lines go to the same stream as the report (stdout by default); the bar
/// itself draws on stderr and is suspended while a line is written.
pub struct ProgressPrinter {
    bar: ProgressBar,
    palette: Palette,
    sink: Option<ProgressSink>,
}

impl ProgressPrinter {
    /// Printer writing lines to stdout, with a bar on stderr when it is a terminal
    pub fn new(palette: Palette) -> Self {
        let bar = ProgressBar::new(WorkloadKind::ALL.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        Self {
            bar,
            palette,
            sink: Some(Box::new(std::io::stdout())),
        }
    }

    /// Printer with no visible output
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            palette: Palette::plain(),
            sink: None,
        }
    }

    /// Write lines to `sink` instead
    pub fn with_sink(mut self, sink: ProgressSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Spawn the printer task. It resolves to the number of messages printed
    /// once the channel is closed and drained.
    pub fn spawn(mut self, mut rx: ProgressReceiver) -> JoinHandle<usize> {
        tokio::spawn(async move {
            let mut printed = 0usize;
            while let Some(message) = rx.recv().await {
                let line = paint(&message.to_string(), self.palette.progress);
                if let Some(sink) = self.sink.as_mut() {
                    let written =
                        self.bar.suspend(|| writeln!(sink, "{}", line).and_then(|_| sink.flush()));
                    if let Err(e) = written {
                        debug!(error = %e, "Failed to write progress line");
                    }
                }
                self.bar.set_position(message.index.saturating_sub(1) as u64);
                self.bar.set_message(message.kind.name());
                printed += 1;
            }
            self.bar.finish_and_clear();
            debug!(printed, "Progress channel closed");
            printed
        })
    }
}
