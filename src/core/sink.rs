//! Sink trait for line output destinations

use super::error::Result;
use super::level::Channel;
use crate::sinks::ConsoleSink;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub trait Sink: Send + Sync {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Sink handle shared between a logger and its clones
pub type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

pub fn shared<S: Sink + 'static>(sink: S) -> SharedSink {
    Arc::new(Mutex::new(Box::new(sink)))
}

/// The four output sinks of a logger, one per [`Channel`]
#[derive(Clone)]
pub struct SinkSet {
    log: SharedSink,
    info: SharedSink,
    warn: SharedSink,
    error: SharedSink,
}

impl SinkSet {
    pub fn new(log: SharedSink, info: SharedSink, warn: SharedSink, error: SharedSink) -> Self {
        Self {
            log,
            info,
            warn,
            error,
        }
    }

    /// `log`/`info` to stdout, `warn`/`error` to stderr
    pub fn console() -> Self {
        Self::new(
            shared(ConsoleSink::stdout()),
            shared(ConsoleSink::stdout()),
            shared(ConsoleSink::stderr()),
            shared(ConsoleSink::stderr()),
        )
    }

    /// Route every channel to the same sink
    pub fn uniform(sink: SharedSink) -> Self {
        Self::new(
            Arc::clone(&sink),
            Arc::clone(&sink),
            Arc::clone(&sink),
            sink,
        )
    }

    pub fn get(&self, channel: Channel) -> &SharedSink {
        match channel {
            Channel::Log => &self.log,
            Channel::Info => &self.info,
            Channel::Warn => &self.warn,
            Channel::Error => &self.error,
        }
    }

    pub fn set(&mut self, channel: Channel, sink: SharedSink) {
        match channel {
            Channel::Log => self.log = sink,
            Channel::Info => self.info = sink,
            Channel::Warn => self.warn = sink,
            Channel::Error => self.error = sink,
        }
    }

    /// Flush every channel, stopping at the first failure
    pub fn flush(&self) -> Result<()> {
        for channel in Channel::ALL {
            self.get(channel).lock().flush()?;
        }
        Ok(())
    }
}

impl Default for SinkSet {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for channel in Channel::ALL {
            map.entry(&channel.to_str(), &self.get(channel).lock().name().to_string());
        }
        map.finish()
    }
}
