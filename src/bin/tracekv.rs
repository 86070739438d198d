use clap::{App, AppSettings, Arg};
use tracekv::{replay, Cache, MemStore, Result, Value, STORE_OP};

#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;

use slog::Drain;
use std::io;

fn main() -> Result<()> {
    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("VALUES")
                .help("Values to store. Integers and floats are detected, anything else is stored as text.")
                .required(true)
                .multiple(true),
        )
        .get_matches();

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = slog::Logger::root(drain, o!());

    let store = MemStore::new(logger.clone());
    let cache = Cache::new(store.clone(), logger.clone())?;

    for raw in matches.values_of("VALUES").expect("VALUES argument missing") {
        let key = cache.store(parse_value(raw))?;
        info!(logger, "stored value"; "key" => key.as_str());
        println!("{}", key);
    }

    replay(&store, STORE_OP, &mut io::stdout())?;
    Ok(())
}

// integers first, then floats, anything else is text
fn parse_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::Float(f)
    } else {
        Value::Str(raw.to_owned())
    }
}
