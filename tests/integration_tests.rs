//! Integration tests for unklogger
//!
//! These tests verify:
//! - Line composition for tags, payloads and errors
//! - Circular structure recovery
//! - Hook ordering and quiet mode
//! - Extension binding
//! - Clone independence
//! - Thread safety

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use unklogger::core::formatter::LINE_ENDING;
use unklogger::core::serializer::serialize;
use unklogger::prelude::*;
use unklogger::{args, info};

const T: &str = "2024-10-17 08:04:02";

fn fixed_clock() -> Clock {
    let at = NaiveDate::from_ymd_opt(2024, 10, 17)
        .and_then(|d| d.and_hms_opt(8, 4, 2))
        .expect("valid datetime");
    Clock::Fixed(at)
}

fn capturing_logger() -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .clock(fixed_clock())
        .all_sinks(sink.clone())
        .colors(false)
        .build();
    (logger, sink)
}

fn sample_object() -> Composite {
    Composite::object()
        .with("number", 123)
        .with("object", Composite::object().with("0", "asd"))
}

#[test]
fn test_single_string() {
    let (logger, sink) = capturing_logger();

    let ctx = logger.info(["I'm a single string."]);

    assert_eq!(ctx.timestamp, T);
    assert!(ctx.tags.is_empty());
    assert_eq!(ctx.output, format!("{} | I'm a single string.", T));
    assert_eq!(sink.lines(), vec![ctx.output.clone()]);
}

#[test]
fn test_object_between_strings() {
    let (logger, _sink) = capturing_logger();

    let ctx = info!(logger, "Object", sample_object(), "String after object.");

    assert_eq!(ctx.tags, vec![Value::from("Object")]);
    assert_eq!(
        ctx.message,
        "{\n    \"number\": 123,\n    \"object\": {\n        \"0\": \"asd\"\n    }\n} String after object."
    );
    assert_eq!(ctx.arguments.len(), 3);
}

#[test]
fn test_circular_object_is_rendered() {
    let (logger, sink) = capturing_logger();
    let circular = sample_object();
    circular.insert("a", &circular);

    let ctx = info!(logger, "Circular object", &circular);

    assert_eq!(
        ctx.message,
        "<ref *1> { number: 123, object: { '0': 'asd' }, a: [Circular *1] }"
    );
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_nested_cycle_marks_inner_node() {
    let outer = Composite::object();
    let inner = Composite::object().with("name", "inner");
    inner.insert("parent", &inner);
    outer.insert("child", &inner);

    let text = serialize(&Value::from(&outer));
    assert_eq!(text, "{ child: <ref *1> { name: 'inner', parent: [Circular *1] } }");
}

#[test]
fn test_multiple_tags() {
    let (logger, _sink) = capturing_logger();

    let ctx = logger.warn(args![vec!["Multiple", "Tags"], "I support multiple tags."]);

    assert_eq!(ctx.tags, vec![Value::from("Multiple"), Value::from("Tags")]);
    assert_eq!(
        ctx.output,
        format!("{} | [Multiple] [Tags] I support multiple tags.", T)
    );
}

#[test]
fn test_array_payload() {
    let (logger, _sink) = capturing_logger();

    let ctx = logger.success(args!["Array", vec![0, 1, 2]]);

    assert_eq!(
        ctx.output,
        format!("{} | [Array] [\n    0,\n    1,\n    2\n]", T)
    );
}

#[test]
fn test_error_with_stack_keeps_lines() {
    let (logger, _sink) = capturing_logger();
    let err = ErrorValue::new("Error", "Oops, something went wrong.")
        .with_stack("Error: Oops, something went wrong.\n    at Object.<anonymous> (test.js:30:11)");

    let ctx = logger.error(args!["Error", err, "retrying"]);

    assert_eq!(
        ctx.message,
        format!(
            "Error: Oops, something went wrong.\n    at Object.<anonymous> (test.js:30:11){}retrying",
            LINE_ENDING
        )
    );
}

#[test]
fn test_std_error_argument() {
    let (logger, _sink) = capturing_logger();
    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connect ECONNREFUSED");

    let ctx = logger.error(args!["Request", Value::error(&err)]);

    assert_eq!(ctx.output, format!("{} | [Request] Error: connect ECONNREFUSED", T));
}

#[test]
fn test_serializable_payload() {
    #[derive(Serialize)]
    struct Response {
        status: u16,
        headers: Vec<&'static str>,
    }

    let (logger, _sink) = capturing_logger();
    let value = Value::from_serialize(&Response {
        status: 404,
        headers: vec!["x-request-id"],
    })
    .expect("serializable");

    let ctx = logger.info(args!["Response", value]);

    assert_eq!(
        ctx.message,
        "{\n    \"status\": 404,\n    \"headers\": [\n        \"x-request-id\"\n    ]\n}"
    );
}

#[test]
fn test_primitives_and_callables() {
    let (logger, _sink) = capturing_logger();

    let ctx = logger.log(args![
        "Mixed",
        1,
        2.5,
        true,
        Value::null(),
        (),
        Callable::new("(a, b) => a + b")
    ]);

    assert_eq!(ctx.message, "1 2.5 true null undefined (a, b) => a + b");
}

#[test]
fn test_hooks_see_each_other() {
    let (mut logger, sink) = capturing_logger();
    logger
        .add_hook("beforeWrite", |ctx| ctx.output = ctx.output.to_uppercase())
        .add_hook("beforeWrite", |ctx| ctx.output.push_str(" !"))
        .add_hook("afterWrite", |ctx| ctx.message.clear());

    let ctx = logger.info(["quiet", "words"]);

    assert_eq!(sink.last(), Some(format!("{} | [QUIET] WORDS !", T)));
    assert_eq!(ctx.output, format!("{} | [QUIET] WORDS !", T));
    assert!(ctx.message.is_empty());
}

#[test]
fn test_hook_edits_are_decorated() {
    let sink = MemorySink::new();
    let mut logger = Logger::builder()
        .clock(fixed_clock())
        .all_sinks(sink.clone())
        .no_decorators()
        .decorator(Level::Warn, |line| format!("[[{}]]", line))
        .build();
    logger.add_hook("beforeWrite", |ctx| ctx.output = format!("{} (pid 42)", ctx.output));

    let ctx = logger.warn(["Cache", "miss"]);

    assert_eq!(ctx.output, format!("{} | [Cache] miss (pid 42)", T));
    assert_eq!(sink.lines(), vec![format!("[[{}]]", ctx.output)]);
}

#[test]
fn test_quiet_mode_still_runs_hooks() {
    let (mut logger, sink) = capturing_logger();
    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));
    {
        let before = Arc::clone(&before);
        logger.add_hook(HookEvent::BeforeWrite, move |_ctx| {
            before.fetch_add(1, Ordering::SeqCst);
        });
        let after = Arc::clone(&after);
        logger.add_hook(HookEvent::AfterWrite, move |_ctx| {
            after.fetch_add(1, Ordering::SeqCst);
        });
    }
    logger.config_mut().quiet = true;

    for i in 0..3 {
        let ctx = logger.info(args!["n", i]);
        assert_eq!(ctx.output, format!("{} | [n] {}", T, i));
    }

    assert!(sink.is_empty());
    assert_eq!(before.load(Ordering::SeqCst), 3);
    assert_eq!(after.load(Ordering::SeqCst), 3);
}

#[test]
fn test_extension_receives_context_and_arguments() {
    let (mut logger, _sink) = capturing_logger();
    logger.add_extension("describe", |ctx, args| {
        let suffix: Vec<String> = args.iter().map(Value::to_display_string).collect();
        Value::from(format!("{} [{}]", ctx.message, suffix.join("/")))
    });

    let ctx = logger.info(["payload"]);

    assert_eq!(
        ctx.call("describe", args!["a", 1]),
        Some(Value::from("payload [a/1]"))
    );
    assert_eq!(ctx.call("missing", args![]), None);
}

#[test]
fn test_extension_can_relog_through_clone() {
    let (mut logger, sink) = capturing_logger();
    let relay = logger.clone();
    logger.add_extension("again", move |ctx, _args| {
        let copy = relay.info([ctx.message.as_str()]);
        Value::from(copy.output)
    });

    let ctx = logger.info(["twice"]);
    let relayed = ctx.call("again", args![]);

    assert_eq!(relayed, Some(Value::from(format!("{} | twice", T))));
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_clone_copies_config_by_value() {
    let (mut logger, _sink) = capturing_logger();
    logger.set_quiet(true);

    let mut copy = logger.clone();
    assert_eq!(copy.config(), logger.config());

    copy.set_quiet(false);
    copy.set_colors(true);
    assert!(logger.is_quiet());
    assert!(!logger.colors_enabled());
}

#[test]
fn test_zero_arguments() {
    let (logger, sink) = capturing_logger();

    let ctx = logger.info(args![]);

    assert_eq!(ctx.message, "");
    assert_eq!(ctx.output, format!("{} | ", T));
    assert_eq!(sink.last(), Some(format!("{} | ", T)));
}

#[test]
fn test_concurrent_logging() {
    let (logger, sink) = capturing_logger();
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger_clone = Arc::clone(&logger);
        let handle = std::thread::spawn(move || {
            for i in 0..10 {
                logger_clone.info(args![format!("Thread {}", thread_id), "Message", i]);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 50, "Should have 50 lines from 5 threads * 10 messages");
    assert!(lines.iter().all(|l| l.starts_with(T)));
    assert_eq!(logger.metrics().lines_written(), 50);
}

#[test]
fn test_failing_sink_does_not_break_logging() {
    struct FailingSink {
        attempts: Arc<AtomicUsize>,
    }

    impl Sink for FailingSink {
        fn write_line(&mut self, _line: &str) -> unklogger::Result<()> {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            Err(LoggerError::writer("Simulated failure"))
        }

        fn flush(&mut self) -> unklogger::Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "FailingSink"
        }
    }

    let attempts = Arc::new(AtomicUsize::new(0));
    let logger = Logger::builder()
        .clock(fixed_clock())
        .all_sinks(FailingSink {
            attempts: Arc::clone(&attempts),
        })
        .build();

    for _ in 0..5 {
        let ctx = logger.warn(["still", "returned"]);
        assert_eq!(ctx.output, format!("{} | [still] returned", T));
    }

    assert_eq!(attempts.load(Ordering::Relaxed), 5);
    assert_eq!(logger.metrics().write_failures(), 5);
    assert_eq!(logger.metrics().lines_written(), 0);
}
