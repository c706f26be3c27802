//! AstroGroot command-line entry point.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use astrogroot::config;
use astrogroot::ingest::IngestService;
use astrogroot::repository::{create_pool, migrations, ContentRepository};
use astrogroot::server;

#[derive(Parser)]
#[command(name = "astrogroot", version, about = "Astronomy research content portal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1", env = "ASTROGROOT_HOST")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080, env = "ASTROGROOT_PORT")]
        port: u16,
    },
    /// Fetch content from external feeds into the library
    Ingest {
        /// Which source to ingest
        #[arg(long, value_enum, default_value_t = IngestSource::All)]
        source: IngestSource,
        /// Search query for the NASA image library
        #[arg(long, default_value = "astronomy")]
        query: String,
        /// Maximum papers to fetch from arXiv
        #[arg(long, default_value_t = 50)]
        max_papers: u32,
    },
    /// Print library statistics
    Stats,
    /// Create the data directory and database schema
    Init,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IngestSource {
    All,
    Papers,
    Videos,
    Nasa,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings();

    match cli.command {
        Command::Serve { host, port } => {
            server::serve(&settings, &host, port).await?;
        }
        Command::Ingest {
            source,
            query,
            max_papers,
        } => {
            settings.ensure_directories()?;
            let pool = create_pool(&settings.database_path())?;
            migrations::run_migrations(&pool).await?;
            let repo = ContentRepository::new(pool);
            let ingest = IngestService::new(&settings, repo);

            let mut fetched = 0;
            let mut stored = 0;
            if matches!(source, IngestSource::All | IngestSource::Papers) {
                let report = ingest.ingest_papers(max_papers).await?;
                fetched += report.fetched;
                stored += report.stored;
            }
            if matches!(source, IngestSource::All | IngestSource::Videos) {
                let report = ingest.ingest_videos().await?;
                fetched += report.fetched;
                stored += report.stored;
            }
            if matches!(source, IngestSource::All | IngestSource::Nasa) {
                let report = ingest.ingest_nasa(&query).await?;
                fetched += report.fetched;
                stored += report.stored;
            }
            println!("Ingested {} of {} fetched items", stored, fetched);
        }
        Command::Stats => {
            let pool = create_pool(&settings.database_path())?;
            migrations::run_migrations(&pool).await?;
            let repo = ContentRepository::new(pool);
            let stats = repo.stats().await?;
            println!("papers: {}", stats.papers);
            println!("videos: {}", stats.videos);
            println!("nasa:   {}", stats.nasa);
            println!("total:  {}", stats.total);
        }
        Command::Init => {
            settings.ensure_directories()?;
            let pool = create_pool(&settings.database_path())?;
            migrations::run_migrations(&pool).await?;
            println!("Initialized {}", settings.database_path().display());
        }
    }

    Ok(())
}
