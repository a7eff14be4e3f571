//! gbp CLI entry point.

use std::process::ExitCode;

use gbpcli::cli::{self, GlobalArgs};
use gbpcli::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("gbpcli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gbpcli=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let argv: Vec<_> = std::env::args_os().collect();
    let globals = GlobalArgs::parse_lenient(argv.iter().cloned());
    init_tracing(globals.debug);

    let mut ui = create_ui(globals.output_mode(), !globals.no_color);
    let code = cli::run(argv, ui.as_mut());

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
