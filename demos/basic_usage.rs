//! Basic logger usage example
//!
//! Demonstrates tags, mixed payloads, circular objects and errors.
//!
//! Run with: cargo run --example basic_usage

use unklogger::prelude::*;
use unklogger::{args, error, info, success, warn};

fn main() -> Result<()> {
    let logger = Logger::new();

    logger.info(["I'm a single string."]);

    let object = Composite::object()
        .with("number", 123)
        .with("object", Composite::object().with("0", "asd"));
    logger.info([&object]);
    info!(logger, "Object", &object, "String after object.");

    let circular = object.clone();
    circular.insert("a", &circular);
    info!(logger, "Circular object", &circular);

    warn!(logger, "String", "Text string that is long enough.");
    warn!(logger, vec!["Multiple", "Tags"], "I support multiple tags.");
    success!(logger, "Array", vec![0, 1, 2, 3, 4, 5]);

    let err = std::io::Error::new(std::io::ErrorKind::Other, "Oops, something went wrong.");
    error!(logger, "Error", Value::error(&err));

    // Method form, arguments converted with `args!`
    logger.log(args!["Done", true]);

    logger.flush()
}
