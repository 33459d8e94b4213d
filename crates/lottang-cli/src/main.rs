mod geocode;
mod score;
mod stores;
mod winners;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lottang")]
#[command(about = "Lottang winning-store scraping and scoring pipelines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape winning-store rows for a range of draws
    Winners {
        /// First draw number (inclusive)
        #[arg(long)]
        start: u32,
        /// Last draw number (inclusive)
        #[arg(long)]
        end: u32,
        #[arg(long, default_value = "data/winners_raw.csv")]
        out: PathBuf,
        /// Continue an existing output file instead of starting over
        #[arg(long)]
        append: bool,
        /// Archive pages to scan when all detail strategies miss
        #[arg(long)]
        archive_pages: Option<u32>,
    },
    /// Crawl the seller directory into a store list
    Stores {
        /// Single si/do to crawl (requires --gugun); defaults to the
        /// configured region file
        #[arg(long)]
        sido: Option<String>,
        /// Single gu/gun to crawl (requires --sido)
        #[arg(long)]
        gugun: Option<String>,
        #[arg(long, default_value = "data/stores_raw.csv")]
        out: PathBuf,
    },
    /// Merge winners with the store directory and compute scores
    Score {
        #[arg(long, default_value = "data/winners_raw.csv")]
        winners: PathBuf,
        #[arg(long, default_value = "data/stores_raw.csv")]
        stores: PathBuf,
        #[arg(long, default_value = "data/lottang_stores_scored.csv")]
        out: PathBuf,
    },
    /// Resolve coordinates for scored stores via Kakao Local
    Geocode {
        #[arg(long, default_value = "data/lottang_stores_scored.csv")]
        input: PathBuf,
        #[arg(long, default_value = "data/lottang_stores_geo.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = lottang_core::load_app_config()?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();
    match cli.command {
        Commands::Winners {
            start,
            end,
            out,
            append,
            archive_pages,
        } => winners::run(&config, start, end, &out, append, archive_pages).await,
        Commands::Stores { sido, gugun, out } => stores::run(&config, sido, gugun, &out).await,
        Commands::Score {
            winners,
            stores,
            out,
        } => score::run(&winners, &stores, &out),
        Commands::Geocode { input, out } => geocode::run(&config, &input, &out).await,
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
