use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use stock_tracking::{
    app::{
        Cli, Command,
        export::{export_listing, export_quotes},
        view::{render_listing, render_quote, render_quotes, save_message},
    },
    config::{Config, expand_path},
    db::Store,
    logger::init_tracing,
    models::{ListingSnapshot, QuoteLedger},
    services::RetrievalPipeline,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match &cli.command {
        Command::Show { limit } => {
            let store = Store::new(cli.database_path());
            let listing = ListingSnapshot::new(store.read_listing().await);
            let quotes = QuoteLedger::from(store.read_quotes().await);

            print!("{}", render_listing(&listing, *limit));
            println!();
            print!("{}", render_quotes(&quotes));
        }
        Command::Export { listing, quotes } => {
            let store = Store::new(cli.database_path());
            let listing_path = expand_path(listing);
            let quotes_path = expand_path(quotes);

            export_listing(&store.read_listing().await, &listing_path)?;
            export_quotes(&store.read_quotes().await, &quotes_path)?;

            println!(
                "Exported {} and {}",
                listing_path.display(),
                quotes_path.display()
            );
        }
        Command::Listing { date, limit, save } => {
            let mut pipeline = open_pipeline(&cli).await?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());

            match pipeline.refresh_listing(date).await {
                Ok(snapshot) => println!("Listing status for {} ({} symbols)", date, snapshot.len()),
                Err(failure) => {
                    warn!("{}", failure);
                    if failure.fallback_applied {
                        println!("An error has occurred; the stored listing status was loaded.");
                    } else {
                        println!("An error has occurred and the database is unavailable.");
                    }
                }
            }
            print!("{}", render_listing(pipeline.listing(), *limit));

            if *save {
                let (listing, quotes) = pipeline.persist().await;
                println!("{}", save_message(listing, quotes));
            }
        }
        Command::Quote { symbol, save } => {
            let mut pipeline = open_pipeline(&cli).await?;

            match pipeline.refresh_quote(symbol).await {
                Ok(quote) => print!("{}", render_quote(&quote)),
                Err(failure) => {
                    warn!("{}", failure);
                    println!("An error occurred while fetching {}. Try again later.", symbol);
                }
            }
            println!();
            println!("Global Quotes Consulted");
            print!("{}", render_quotes(pipeline.quotes()));

            if *save {
                let (listing, quotes) = pipeline.persist().await;
                println!("{}", save_message(listing, quotes));
            }
        }
    }

    Ok(())
}

async fn open_pipeline(cli: &Cli) -> Result<RetrievalPipeline> {
    let config = cli.apply(Config::from_env()?);
    let mut pipeline =
        RetrievalPipeline::from_config(&config).with_context(|| "Failed to build the HTTP client")?;

    if let Err(e) = pipeline.store().init().await {
        warn!("Database unavailable, continuing without it: {}", e);
    }
    pipeline.load_from_store().await;

    info!(db = %config.database_path.display(), "pipeline ready");
    Ok(pipeline)
}
