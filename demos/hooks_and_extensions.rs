//! Hooks and extensions example
//!
//! A `beforeWrite` hook rewrites every line, an `afterWrite` hook counts
//! lines, and an extension lets the caller escalate a line after the fact.
//!
//! Run with: cargo run --example hooks_and_extensions

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use unklogger::prelude::*;

fn main() -> Result<()> {
    let mut logger = Logger::new();
    let written = Arc::new(AtomicU64::new(0));

    let escalation = logger.clone();
    let counter = Arc::clone(&written);
    logger
        .add_hook("beforeWrite", |ctx| {
            ctx.output = format!("{} (pid {})", ctx.output, std::process::id());
        })
        .add_hook("afterWrite", move |_ctx| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .add_extension("escalate", move |ctx, args| {
            let mut escalated = vec![Value::from("ESCALATED")];
            escalated.push(Value::from(ctx.message.clone()));
            escalated.extend(args.iter().cloned());
            Value::from(escalation.error(escalated).output)
        });

    // Unknown events and bad names are reported, not raised
    logger.add_hook("onWrite", |_ctx| {});
    logger.add_extension("not valid", |_ctx, _args| Value::null());

    let ctx = logger.warn(["Cache", "hit ratio below 50%"]);
    ctx.call("escalate", ["paging on-call"]);

    println!("lines through hooked logger: {}", written.load(Ordering::Relaxed));
    logger.flush()
}
