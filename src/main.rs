//! Binary entry point: parse the command line, route logs to a file, then
//! either print one report or hand control to the Ratatui event loop.
use std::io::{self, Write};

use anyhow::Context;
use book_analytics_dashboard::config::CommandLine;
use book_analytics_dashboard::logging::init_logging;
use book_analytics_dashboard::report::write_report;
use book_analytics_dashboard::{render_cycle, run_app, App};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    let _log_guard = init_logging(&cli.log_dir()?)?;
    let filters = cli.filters();
    info!(db = %cli.db.display(), print = cli.print, "starting dashboard");

    if cli.print {
        let view = render_cycle(&cli.db, &filters)
            .with_context(|| format!("failed to load dashboard from {}", cli.db.display()))?;
        let mut stdout = io::stdout().lock();
        write_report(&mut stdout, &view, &filters).context("failed to write report")?;
        stdout.flush().context("failed to flush report")?;
        return Ok(());
    }

    let mut app = App::new(cli.db.clone(), filters);
    run_app(&mut app)
}
