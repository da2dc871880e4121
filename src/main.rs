use std::process::ExitCode;

use structdb::cli::{self, Cli};
use structdb::engine::ExecError;
use structdb::ui::output;

/// Logging goes to stderr so query output on stdout stays clean.
///
/// `--quiet` turns logging off, `--debug` enables debug events, and
/// otherwise `RUST_LOG` applies with `warn` as the fallback.
fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ExecError>() {
                Some(exec) => eprintln!("ERROR {}: {}", exec.code(), exec),
                None => output::error(format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}
