use anyhow::{Context, Result};

mod args;
mod cmd_export;

use args::{CommandLineArgs, GlobalArgs};
use cmd_export::MissingToken;

/// Set up the logging / tracing system for the application.
fn configure_tracing(global_args: &GlobalArgs) -> Result<()> {
    use tracing_log::{AsLog, LogTracer};
    use tracing_subscriber::{filter::LevelFilter, EnvFilter};

    // Set the tracing level according to the `-q`/`--quiet` and `-v`/`--verbose` options
    let level_filter = if global_args.quiet {
        LevelFilter::ERROR
    } else {
        match global_args.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Configure the bridge from the `log` crate to the `tracing` crate
    LogTracer::builder()
        .with_max_level(level_filter.as_log())
        .init()?;

    // Configure logging filters according to the `GCE_LOG` environment variable
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("GCE_LOG")
        .from_env()
        .context("Failed to parse filters from GCE_LOG environment variable")?;

    // Install the global tracing subscriber
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_ansi(global_args.use_color(std::io::stderr()))
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Enable or disable colored output according to the global arguments.
fn configure_color(global_args: &GlobalArgs) {
    console::set_colors_enabled(global_args.use_color(std::io::stdout()));
    console::set_colors_enabled_stderr(global_args.use_color(std::io::stderr()));
}

fn try_main(args: &CommandLineArgs) -> Result<()> {
    let global_args = &args.global_args;

    configure_color(global_args);
    configure_tracing(global_args).context("Failed to initialize logging")?;

    cmd_export::run(global_args, &args.export_args)
}

fn main() {
    let args = &CommandLineArgs::parse_args();
    if let Err(e) = try_main(args) {
        let prefix = console::style("Error:").red().bold().for_stderr();
        // Use the more verbose format that includes a backtrace when running with -vv or higher,
        // otherwise use a more compact one-line error format.
        if args.global_args.verbose > 1 {
            eprintln!("{prefix} {e:?}");
        } else {
            eprintln!("{prefix} {e:#}");
        }
        // A missing token is a configuration error, reported before anything else happens
        let code = if e.is::<MissingToken>() { 1 } else { 2 };
        std::process::exit(code);
    }
}
