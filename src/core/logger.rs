//! Main logger implementation

use super::{
    decorator::{Decorator, Decorators},
    error::Result,
    event_context::EventContext,
    extensions::ExtensionRegistry,
    formatter,
    hooks::{HookEvent, HookRegistry},
    level::{Channel, Level},
    metrics::LoggerMetrics,
    sink::{shared, SharedSink, Sink, SinkSet},
    timestamp::Clock,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tag used when the logger reports misuse of its own API
pub const INTERNAL_TAG: &str = "unklogger";

/// Plain configuration values of a logger
///
/// # Example
///
/// ```
/// use unklogger::LoggerConfig;
///
/// let config: LoggerConfig = serde_json::from_str(r#"{"quiet": true}"#).unwrap();
/// assert!(config.quiet);
/// assert!(config.colors);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Suppress all writes; hooks still run
    pub quiet: bool,
    /// Apply the level decorators when writing
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            colors: true,
        }
    }
}

/// Console logger with tags, hooks and per-event extensions
///
/// Every entry point returns the [`EventContext`] of the call.
///
/// # Example
///
/// ```
/// use unklogger::prelude::*;
///
/// let logger = Logger::new();
/// let ctx = logger.info(["Server", "listening on :8080"]);
/// assert!(ctx.output.ends_with("| [Server] listening on :8080"));
/// ```
pub struct Logger {
    config: LoggerConfig,
    clock: Clock,
    sinks: SinkSet,
    decorators: Decorators,
    hooks: HookRegistry,
    extensions: ExtensionRegistry,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Not quiet, colors on, console sinks, no hooks or extensions
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            clock: Clock::default(),
            sinks: SinkSet::default(),
            decorators: Decorators::default(),
            hooks: HookRegistry::new(),
            extensions: ExtensionRegistry::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LoggerConfig {
        &mut self.config
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.config.quiet = quiet;
    }

    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    pub fn set_colors(&mut self, colors: bool) {
        self.config.colors = colors;
    }

    pub fn colors_enabled(&self) -> bool {
        self.config.colors
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn sinks(&self) -> &SinkSet {
        &self.sinks
    }

    pub fn set_sink<S: Sink + 'static>(&mut self, channel: Channel, sink: S) {
        self.sinks.set(channel, shared(sink));
    }

    pub fn set_shared_sink(&mut self, channel: Channel, sink: SharedSink) {
        self.sinks.set(channel, sink);
    }

    pub fn set_decorator<F>(&mut self, level: Level, decorator: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.decorators.set(level, Arc::new(decorator));
    }

    pub fn clear_decorator(&mut self, level: Level) {
        self.decorators.clear(level);
    }

    /// Register a hook for `"beforeWrite"` or `"afterWrite"`
    ///
    /// Unknown event names are reported on the warn channel and ignored.
    pub fn add_hook<F>(&mut self, event: impl AsRef<str>, hook: F) -> &mut Self
    where
        F: Fn(&mut EventContext) + Send + Sync + 'static,
    {
        match event.as_ref().parse::<HookEvent>() {
            Ok(event) => self.hooks.register(event, Arc::new(hook)),
            Err(e) => {
                self.warn([Value::from(INTERNAL_TAG), Value::from(e.to_string())]);
            }
        }
        self
    }

    /// Register an extension bound onto every context produced afterwards
    ///
    /// Names that are not identifiers are reported on the error channel and
    /// ignored. Registering an existing name replaces it.
    pub fn add_extension<F>(&mut self, name: impl Into<String>, extension: F) -> &mut Self
    where
        F: Fn(&EventContext, &[Value]) -> Value + Send + Sync + 'static,
    {
        if let Err(e) = self.extensions.register(name, Arc::new(extension)) {
            self.error([Value::from(INTERNAL_TAG), Value::from(e.to_string())]);
        }
        self
    }

    pub fn hook_count(&self, event: HookEvent) -> usize {
        self.hooks.len(event)
    }

    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.names()
    }

    /// Format, run hooks, write and bind extensions for one call
    pub fn emit<I>(&self, level: Level, args: I) -> EventContext
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let arguments: Vec<Value> = args.into_iter().map(Into::into).collect();
        let mut context = formatter::format(arguments, self.clock.now());
        self.metrics.record_event();

        self.hooks.run(HookEvent::BeforeWrite, &mut context);

        if self.config.quiet {
            self.metrics.record_suppressed();
        } else {
            self.write(level, &context.output);
        }

        self.hooks.run(HookEvent::AfterWrite, &mut context);
        self.extensions.bind(&mut context);

        context
    }

    fn write(&self, level: Level, output: &str) {
        let decorated = if self.config.colors {
            self.decorators.decorate(level, output)
        } else {
            None
        };
        let line = decorated.as_deref().unwrap_or(output);

        let channel = level.channel();
        let result = self.sinks.get(channel).lock().write_line(line);

        match result {
            Ok(()) => self.metrics.record_written(),
            Err(e) => {
                let previous = self.metrics.record_write_failure();
                eprintln!(
                    "[LOGGER ERROR] {} sink failed ({} earlier failures): {}",
                    channel, previous, e
                );
            }
        }
    }

    #[inline]
    pub fn log<I>(&self, args: I) -> EventContext
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit(Level::Log, args)
    }

    #[inline]
    pub fn info<I>(&self, args: I) -> EventContext
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit(Level::Info, args)
    }

    #[inline]
    pub fn success<I>(&self, args: I) -> EventContext
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit(Level::Success, args)
    }

    #[inline]
    pub fn warn<I>(&self, args: I) -> EventContext
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit(Level::Warn, args)
    }

    #[inline]
    pub fn error<I>(&self, args: I) -> EventContext
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit(Level::Error, args)
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.sinks.flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies configuration, hook lists and extensions; sinks stay shared and
/// metrics start from zero.
impl Clone for Logger {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            clock: self.clock,
            sinks: self.sinks.clone(),
            decorators: self.decorators.clone(),
            hooks: self.hooks.clone(),
            extensions: self.extensions.clone(),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("sinks", &self.sinks)
            .field("decorators", &self.decorators)
            .field("hooks", &self.hooks)
            .field("extensions", &self.extensions)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use unklogger::prelude::*;
///
/// let captured = MemorySink::new();
/// let logger = Logger::builder()
///     .colors(false)
///     .sink(Channel::Error, captured.clone())
///     .decorator(Level::Warn, |line| format!("!! {}", line))
///     .build();
///
/// logger.error(["db", "connection refused"]);
/// assert_eq!(captured.len(), 1);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    clock: Clock,
    sinks: SinkSet,
    decorators: Decorators,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            clock: Clock::default(),
            sinks: SinkSet::default(),
            decorators: Decorators::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.config.quiet = quiet;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, colors: bool) -> Self {
        self.config.colors = colors;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the sink of one channel
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, channel: Channel, sink: S) -> Self {
        self.sinks.set(channel, shared(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, channel: Channel, sink: SharedSink) -> Self {
        self.sinks.set(channel, sink);
        self
    }

    /// Route all four channels to one sink
    #[must_use = "builder methods return a new value"]
    pub fn all_sinks<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks = SinkSet::uniform(shared(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn decorator<F>(mut self, level: Level, decorator: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let decorator: Decorator = Arc::new(decorator);
        self.decorators.set(level, decorator);
        self
    }

    /// Drop every decorator, including the default colors
    #[must_use = "builder methods return a new value"]
    pub fn no_decorators(mut self) -> Self {
        self.decorators = Decorators::none();
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            config: self.config,
            clock: self.clock,
            sinks: self.sinks,
            decorators: self.decorators,
            hooks: HookRegistry::new(),
            extensions: ExtensionRegistry::new(),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Composite, LoggerError};
    use crate::sinks::MemorySink;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const T: &str = "2025-01-08 10:30:45";

    fn fixed_clock() -> Clock {
        let at = NaiveDate::from_ymd_opt(2025, 1, 8)
            .and_then(|d| d.and_hms_opt(10, 30, 45))
            .expect("valid datetime");
        Clock::Fixed(at)
    }

    fn capturing_logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .clock(fixed_clock())
            .all_sinks(sink.clone())
            .no_decorators()
            .build();
        (logger, sink)
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn write_line(&mut self, _line: &str) -> Result<()> {
            Err(LoggerError::writer("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_default_config() {
        let logger = Logger::new();
        assert!(!logger.is_quiet());
        assert!(logger.colors_enabled());
        assert_eq!(logger.clock(), Clock::Local);
        assert_eq!(logger.hook_count(HookEvent::BeforeWrite), 0);
        assert_eq!(logger.extension_names().count(), 0);
        assert_eq!(logger.sinks().get(Channel::Error).lock().name(), "stderr");
        assert_eq!(logger.sinks().get(Channel::Info).lock().name(), "stdout");
    }

    #[test]
    fn test_end_to_end_scenarios() {
        let (logger, sink) = capturing_logger();

        assert_eq!(logger.info(["FOO"]).output, format!("{} | FOO", T));

        let ctx = logger.info(["FOO", "BAR"]);
        assert_eq!(ctx.tags, vec![Value::from("FOO")]);
        assert_eq!(ctx.output, format!("{} | [FOO] BAR", T));

        let ctx = logger.info([Value::from(Composite::array()), "FOO".into(), "BAR".into()]);
        assert!(ctx.tags.is_empty());
        assert_eq!(ctx.output, format!("{} | FOO BAR", T));

        let ctx = logger.info([Composite::object().with("foo", "FOO")]);
        assert_eq!(ctx.output, format!("{} | {{\n    \"foo\": \"FOO\"\n}}", T));

        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_before_write_hook_changes_written_line() {
        let (mut logger, sink) = capturing_logger();
        logger.add_hook("beforeWrite", |ctx| ctx.output.push_str(" X"));

        let ctx = logger.info(["FOO"]);
        assert_eq!(ctx.output, format!("{} | FOO X", T));
        assert_eq!(sink.last(), Some(format!("{} | FOO X", T)));
    }

    #[test]
    fn test_after_write_hook_does_not_change_written_line() {
        let (mut logger, sink) = capturing_logger();
        logger.add_hook(HookEvent::AfterWrite, |ctx| ctx.output.push_str(" late"));

        let ctx = logger.info(["FOO"]);
        assert_eq!(ctx.output, format!("{} | FOO late", T));
        assert_eq!(sink.last(), Some(format!("{} | FOO", T)));
    }

    #[test]
    fn test_extension_ping() {
        let (mut logger, _sink) = capturing_logger();
        logger.add_extension("ping", |_ctx, _args| Value::from("pong"));

        let ctx = logger.info(["FOO"]);
        assert_eq!(ctx.call("ping", Vec::<Value>::new()), Some(Value::from("pong")));
    }

    #[test]
    fn test_extension_not_retroactive() {
        let (mut logger, _sink) = capturing_logger();
        let before = logger.info(["FOO"]);
        logger.add_extension("late", |_ctx, _args| Value::null());

        assert!(!before.has_extension("late"));
        assert!(logger.info(["FOO"]).has_extension("late"));
    }

    #[test]
    fn test_invalid_hook_event_reported_on_warn_channel() {
        let warn_sink = MemorySink::new();
        let mut logger = Logger::builder()
            .clock(fixed_clock())
            .all_sinks(MemorySink::new())
            .sink(Channel::Warn, warn_sink.clone())
            .no_decorators()
            .build();

        logger.add_hook("onWrite", |_ctx| {});

        assert_eq!(logger.hook_count(HookEvent::BeforeWrite), 0);
        assert_eq!(logger.hook_count(HookEvent::AfterWrite), 0);
        let line = warn_sink.last().expect("warning written");
        assert!(line.contains("[unklogger] Invalid hook event 'onWrite'"));
    }

    #[test]
    fn test_invalid_extension_reported_on_error_channel() {
        let error_sink = MemorySink::new();
        let mut logger = Logger::builder()
            .clock(fixed_clock())
            .all_sinks(MemorySink::new())
            .sink(Channel::Error, error_sink.clone())
            .no_decorators()
            .build();

        logger
            .add_extension("not valid", |_ctx, _args| Value::null())
            .add_extension("valid", |_ctx, _args| Value::null());

        assert_eq!(logger.extension_names().collect::<Vec<_>>(), vec!["valid"]);
        let line = error_sink.last().expect("error written");
        assert!(line.contains("[unklogger] Invalid extension name 'not valid'"));
    }

    #[test]
    fn test_quiet_skips_sink_but_runs_hooks() {
        let (mut logger, sink) = capturing_logger();
        let calls = Arc::new(AtomicUsize::new(0));
        for event in HookEvent::ALL {
            let calls = Arc::clone(&calls);
            logger.add_hook(event, move |_ctx| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }
        logger.set_quiet(true);

        let ctx = logger.warn(["W", "quiet please"]);

        assert!(sink.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(ctx.output, format!("{} | [W] quiet please", T));
        assert_eq!(logger.metrics().lines_suppressed(), 1);
        assert_eq!(logger.metrics().lines_written(), 0);
    }

    #[test]
    fn test_decorator_applied_only_with_colors() {
        let (mut logger, sink) = capturing_logger();
        logger.set_decorator(Level::Error, |line| format!("<red>{}</red>", line));

        let ctx = logger.error(["boom"]);
        assert_eq!(sink.last(), Some(format!("<red>{}</red>", ctx.output)));

        logger.set_colors(false);
        let ctx = logger.error(["boom"]);
        assert_eq!(sink.last(), Some(ctx.output.clone()));

        logger.set_colors(true);
        logger.clear_decorator(Level::Error);
        let ctx = logger.error(["boom"]);
        assert_eq!(sink.last(), Some(ctx.output));
    }

    #[test]
    fn test_before_write_hook_runs_before_decoration() {
        let (mut logger, sink) = capturing_logger();
        logger.set_decorator(Level::Error, |line| format!("<r>{}</r>", line));
        logger.add_hook("beforeWrite", |ctx| ctx.output.push_str(" X"));

        let ctx = logger.error(["m"]);

        assert_eq!(ctx.output, format!("{} | m X", T));
        assert_eq!(sink.last(), Some(format!("<r>{}</r>", ctx.output)));
        assert_eq!(sink.last(), Some(format!("<r>{} | m X</r>", T)));
    }

    #[test]
    fn test_info_is_never_decorated_by_error_decorator() {
        let (mut logger, sink) = capturing_logger();
        logger.set_decorator(Level::Error, |line| format!("<red>{}</red>", line));

        let ctx = logger.info(["fine"]);
        assert_eq!(sink.last(), Some(ctx.output));
    }

    #[test]
    fn test_levels_route_to_channels() {
        let sinks: Vec<MemorySink> = Channel::ALL.iter().map(|c| MemorySink::named(c.to_str())).collect();
        let logger = Logger::builder()
            .clock(fixed_clock())
            .sink(Channel::Log, sinks[0].clone())
            .sink(Channel::Info, sinks[1].clone())
            .sink(Channel::Warn, sinks[2].clone())
            .sink(Channel::Error, sinks[3].clone())
            .no_decorators()
            .build();

        logger.log(["l"]);
        logger.success(["s"]);
        logger.info(["i"]);
        logger.warn(["w"]);
        logger.error(["e"]);

        assert_eq!(sinks[0].len(), 2);
        assert_eq!(sinks[1].len(), 1);
        assert_eq!(sinks[2].len(), 1);
        assert_eq!(sinks[3].len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let (mut logger, sink) = capturing_logger();
        logger.add_hook("beforeWrite", |ctx| ctx.output.push_str(" A"));
        logger.add_extension("one", |_ctx, _args| Value::from(1));

        let mut copy = logger.clone();
        assert_eq!(copy.config(), logger.config());

        copy.set_quiet(true);
        copy.add_hook("beforeWrite", |ctx| ctx.output.push_str(" B"));
        copy.add_extension("two", |_ctx, _args| Value::from(2));
        logger.add_extension("three", |_ctx, _args| Value::from(3));

        assert!(!logger.is_quiet());
        assert_eq!(logger.hook_count(HookEvent::BeforeWrite), 1);
        assert_eq!(copy.hook_count(HookEvent::BeforeWrite), 2);
        assert_eq!(logger.extension_names().collect::<Vec<_>>(), vec!["one", "three"]);
        assert_eq!(copy.extension_names().collect::<Vec<_>>(), vec!["one", "two"]);

        assert_eq!(copy.info(["x"]).output, format!("{} | x A B", T));
        assert!(sink.is_empty());

        // Sinks are shared between clones
        logger.info(["y"]);
        assert_eq!(sink.lines(), vec![format!("{} | y A", T)]);
    }

    #[test]
    fn test_sink_failure_is_counted_not_raised() {
        let logger = Logger::builder()
            .clock(fixed_clock())
            .all_sinks(FailingSink)
            .build();

        let ctx = logger.error(["still returned"]);
        assert_eq!(ctx.output, format!("{} | still returned", T));
        assert_eq!(logger.metrics().write_failures(), 1);
        assert_eq!(logger.metrics().events_emitted(), 1);
    }

    #[test]
    fn test_builder_config() {
        let logger = Logger::builder()
            .config(LoggerConfig {
                quiet: true,
                colors: false,
            })
            .build();
        assert!(logger.is_quiet());
        assert!(!logger.colors_enabled());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = LoggerConfig {
            quiet: true,
            colors: false,
        };
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(json, r#"{"quiet":true,"colors":false}"#);
        let back: LoggerConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }

    #[test]
    fn test_flush() {
        let (logger, _sink) = capturing_logger();
        logger.flush().expect("memory sinks flush");
    }
}
