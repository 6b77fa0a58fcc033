//! jsdoc-annotate CLI entry point

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use jsdoc_annotate::{render_report, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.log_level());

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn execute(cli: &Cli) -> jsdoc_annotate::Result<()> {
    let options = cli.run_options()?;
    let outcome = run(&options)?;
    let summary = render_report(&outcome.report, outcome.output_path.as_deref(), cli.format)?;

    if options.dry_run {
        // stdout carries the annotated source
        print!("{}", outcome.content);
        eprint!("{}", summary);
    } else {
        print!("{}", summary);
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("JSDOC_ANNOTATE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
