// SPDX: CC0-1.0

use anyhow::Context;
use graphing_calculator::{app, session::Session};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{env, ffi::OsString, process::ExitCode};

const LOG_ENV: &str = "GRAPHING_CALCULATOR_LOG";

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn log_level() -> LevelFilter {
    match env::var(LOG_ENV).as_deref().map(str::to_ascii_lowercase).as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("warn") => LevelFilter::Warn,
        Ok("error") => LevelFilter::Error,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

fn usage() {
    let name = env!("CARGO_PKG_NAME");
    eprintln!("usage: {name} <expression>...");
    eprintln!();
    eprintln!("plots each expression as y = f(x), for example:");
    eprintln!(r#"  {name} "x" "1/x" "sin(x)""#);
    eprintln!();
    eprintln!("drag or use the arrow keys/WASD to pan, scroll or +/- to zoom,");
    eprintln!("space to reset the view, escape to quit");
}

/// Expression arguments, or the first one that isn't valid UTF-8.
fn collect_exprs<I>(args: I) -> Result<Vec<String>, OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter().map(OsString::into_string).collect()
}

fn try_main() -> anyhow::Result<ExitCode> {
    let exprs = match collect_exprs(env::args_os().skip(1)) {
        Ok(exprs) if !exprs.is_empty() => exprs,
        Ok(_) => {
            usage();
            return Ok(ExitCode::from(2));
        }
        Err(arg) => {
            eprintln!("argument is not valid UTF-8: {}", arg.to_string_lossy());
            eprintln!();
            usage();
            return Ok(ExitCode::from(2));
        }
    };

    TermLogger::init(
        log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("failed to initialise logger")?;

    let session = Session::new(exprs.iter().map(String::as_str));
    if !session.exprs.iter().any(|e| e.is_plottable()) {
        log::warn!("none of the expressions compiled, the plot will be empty");
    }

    app::run(session)?;
    Ok(ExitCode::SUCCESS)
}
