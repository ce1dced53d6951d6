use crate::app::{AppContext, Result};
use crate::config::LoggingConfig;
use crate::logging;
use crate::render::OutputFormat;
use crate::store::CacheStore;

/// Fetch a feed and print or save it.
pub async fn read_feed(ctx: &AppContext, link: &str, limit: i64, format: &OutputFormat) -> Result<()> {
    tracing::info!(link, limit, ?format, "Reading feed");

    match ctx.reader.fetch_and_render(link, limit, format).await? {
        Some(output) => println!("{}", output),
        None => {
            if let OutputFormat::Json { path: Some(path) }
            | OutputFormat::Fb2 { path }
            | OutputFormat::Pdf { path } = format
            {
                println!("News saved to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Print news previously cached under `date`.
pub fn show_cached(ctx: &AppContext, date: &str) -> Result<()> {
    let news = ctx.store.read(date)?;
    println!("{}", news);
    Ok(())
}

pub fn list_dates(ctx: &AppContext) -> Result<()> {
    let dates = ctx.store.list_tables()?;

    if dates.is_empty() {
        println!("No cached news");
        return Ok(());
    }

    for date in dates {
        println!("{}", date);
    }

    Ok(())
}

/// Print the accumulated log file.
pub fn print_log(config: &LoggingConfig) -> Result<()> {
    tracing::info!("Output logs");
    let content = logging::read_log(&config.file)?;
    print!("{}", content);
    Ok(())
}
