use clap::{CommandFactory, Parser};

use rss_reader::app::AppContext;
use rss_reader::cli::{commands, Cli};
use rss_reader::config::Config;
use rss_reader::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Failed to open log file: {e}");
        logging::init_stderr_only(&config.logging.level);
    }
    tracing::info!("START");

    match run(cli, config).await {
        Ok(()) => {
            tracing::info!("END (correct)");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "END (failed)");
            Err(e)
        }
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    if cli.verbose {
        commands::print_log(&config.logging)?;
        return Ok(());
    }

    let offline = cli.date.is_some() || cli.list_dates;
    if cli.link.is_none() && !offline {
        Cli::command().print_help()?;
        anyhow::bail!("no RSS link given");
    }

    let ctx = AppContext::new(config)?;

    if let Some(link) = &cli.link {
        commands::read_feed(&ctx, link, cli.limit(), &cli.output_format()).await?;
    }
    if cli.list_dates {
        commands::list_dates(&ctx)?;
    }
    if let Some(date) = &cli.date {
        commands::show_cached(&ctx, date)?;
    }

    Ok(())
}
