use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use mixconfig::Config;
use mixcovers::{CoverPipeline, CoverSettings, ImageFetcher};
use mixfeed::{FeedClient, FeedSettings};
use mixplaylist::report::{start_banner, summary_report};
use mixplaylist::{AssemblySettings, PlaylistAssembler, RunOutcome, SpotifyCatalog};
use mixspotify::SpotifySettings;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Crée la playlist du mois à partir des meilleurs posts d'une communauté
#[derive(Parser, Debug)]
#[command(name = "monthlymix", version, about)]
struct Cli {
    /// Répertoire contenant config.yaml
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Nombre de posts à lire
    #[arg(long, value_name = "N")]
    limit: Option<u32>,

    /// Ne pas fabriquer de couverture
    #[arg(long)]
    no_cover: bool,

    /// Niveau de log (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.get_log_min_level());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&cli, &config);
    if let Some(source) = config.source() {
        debug!("Configuration read from {}", source.display());
    }

    // Vérification avant tout appel réseau
    let credentials = match config.credentials() {
        Ok(credentials) => credentials,
        Err(e) if e.is_missing_settings() => {
            println!("{}", e);
            println!(
                "Set SPOTIPY_CLIENT_ID, SPOTIPY_CLIENT_SECRET and SPOTIPY_REDIRECT_URI \
                 in the environment or in config.yaml."
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(&cli, &config, credentials))
}

async fn run(cli: &Cli, config: &Config, credentials: mixconfig::SpotifyCredentials) -> Result<()> {
    let mut feed_settings: FeedSettings = config.section(&["feed"])?;
    if let Some(limit) = cli.limit {
        feed_settings.limit = limit;
    }
    let cover_settings: CoverSettings = config.section(&["cover"])?;
    let spotify_settings: SpotifySettings = config.section(&["spotify"])?;

    let today = chrono::Local::now().date_naive();
    println!("{}", start_banner(&today));

    let feed = FeedClient::from_settings(&feed_settings)?;
    let images = ImageFetcher::new(
        &feed_settings.user_agent,
        Duration::from_secs(feed_settings.timeout_secs),
    )?;
    // Authentification différée jusqu'au premier appel au catalogue
    let catalog = SpotifyCatalog::new(spotify_settings, credentials);

    let settings = AssemblySettings::from_sections(
        &feed_settings,
        &cover_settings,
        config.get_insert_batch_size(),
    );
    let mut assembler = PlaylistAssembler::new(&feed, &images, &catalog, settings);
    if cli.no_cover {
        info!("Cover creation disabled");
    } else {
        assembler = assembler.with_covers(CoverPipeline::new(cover_settings)?);
    }

    let outcome = assembler.run(&today).await.context("Playlist creation failed")?;
    match outcome {
        RunOutcome::NoPosts => {
            println!("No posts found!");
        }
        RunOutcome::NoSongs { posts } => {
            println!("No songs could be parsed from {} posts!", posts);
        }
        RunOutcome::Completed(summary) => {
            println!("{}", summary_report(&summary));
            println!("Playlist creation complete!");
        }
    }

    Ok(())
}
