//! Notification sinks provided by the runtime.
//!
//! None of these can fail the game. A sink that hits an I/O error logs it once and
//! goes quiet.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::EventSink;
use crate::types::GameEvent;

/// Logs every notification through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started | GameEvent::GameOver { .. } => info!(?event, "game event"),
            _ => debug!(?event, "game event"),
        }
    }
}

/// Appends each notification as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: Option<W>,
    buf: Vec<u8>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            buf: Vec::with_capacity(128),
        }
    }

    /// False once a write has failed.
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    pub fn into_inner(self) -> Option<W> {
        self.writer
    }

    fn write_event(&mut self, event: &GameEvent) -> anyhow::Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        self.buf.clear();
        serde_json::to_writer(&mut self.buf, event)?;
        self.buf.push(b'\n');
        writer.write_all(&self.buf)?;
        writer.flush()?;
        Ok(())
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Open (or create) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn notify(&mut self, event: &GameEvent) {
        if let Err(err) = self.write_event(event) {
            warn!(error = %err, "event log write failed; disabling event log");
            self.writer = None;
        }
    }
}

/// Forwards notifications to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelSink {
    fn notify(&mut self, event: &GameEvent) {
        let _ = self.tx.send(*event);
    }
}

/// Delivers each notification to several sinks, in insertion order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink + Send>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: impl EventSink + Send + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn with(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn notify(&mut self, event: &GameEvent) {
        for sink in &mut self.sinks {
            sink.notify(event);
        }
    }
}
