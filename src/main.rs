use std::{env, io, process};

use rserb::cli::{output, run};
use rserb::config::Settings;
use rserb::exitcode;
use rserb::infrastructure::di::ServiceContainer;
use rserb::util::testing::LOG_ENV;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    setup_logging();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            process::exit(exitcode::CONFIG);
        }
    };
    let container = ServiceContainer::new(settings);

    let argv: Vec<String> = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(argv, &container, &mut out) {
        if e.is_command_option() {
            output::option_error(&e);
        } else {
            output::error(&e);
        }
        process::exit(e.exit_code());
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Diagnostics go to stderr; stdout carries the rendered output
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::debug!("logging initialised from {}", LOG_ENV);
}
