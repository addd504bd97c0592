//! `pipex` CLI - classify platform URLs and extract playlists and streams

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pipex::config::Settings;

#[derive(Parser)]
#[command(name = "pipex")]
#[command(about = "Extract streams, playlists and channels from content platforms")]
#[command(version)]
struct Cli {
    /// Content language, e.g. `de` or `pt-BR` (overrides the config file)
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Content country, e.g. `US` (overrides the config file)
    #[arg(short, long, global = true)]
    country: Option<String>,

    /// Log extraction details (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported services
    Services,

    /// Show which service and link type a URL belongs to
    Classify {
        /// URL to classify
        url: String,
    },

    /// Extract a playlist or album
    Playlist {
        /// Playlist URL
        url: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Follow continuation pages until the listing ends
        #[arg(long)]
        all_pages: bool,
    },

    /// Extract a single stream or track
    Stream {
        /// Stream URL
        url: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pipex={default_level}")));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut settings = Settings::load()?;
    if let Some(language) = cli.language {
        apply_language(&mut settings, &language);
    }
    if let Some(country) = cli.country {
        settings.country = Some(country);
    }

    match cli.command {
        Commands::Services => cmd::cmd_services(),
        Commands::Classify { url } => cmd::cmd_classify(&url),
        Commands::Playlist {
            url,
            json,
            all_pages,
        } => cmd::cmd_playlist(&settings, &url, json, all_pages),
        Commands::Stream { url, json } => cmd::cmd_stream(&settings, &url, json),
    }
}

/// `--language pt-BR` sets both parts; a bare language keeps the country.
fn apply_language(settings: &mut Settings, code: &str) {
    if let Some(localization) = pipex::Localization::from_localization_code(code) {
        settings.language = localization.language_code().to_string();
        if !localization.country_code().is_empty() {
            settings.country = Some(localization.country_code().to_string());
        }
    }
}
