use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::args::Cli;
use crate::config::Settings;
use crate::error::Result;
use crate::processors::ReportProcessor;
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportWriter;

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(&cli);

    let settings = Settings::load_layered(cli.config.as_deref())?;
    let query = cli.query()?;
    info!("Running {:?} report for {}", query.mode, query.period);

    let processor = ReportProcessor::from_settings(&settings);
    let progress = ProgressReporter::new("Reading station files", cli.quiet);

    let (report, stats) = processor.process_directory(&cli.path, &query, Some(&progress))?;
    progress.finish_and_clear();

    debug!("{}", stats.summary());

    let writer = ReportWriter::new(settings.missing_values, !cli.no_color);
    print!("{}", writer.render(&report));

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the level chosen by flags.
fn setup_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weatherman={}", cli.log_level())));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", cli.log_level());
}
