use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use setsmith::{
    cli,
    config::{self, Config},
    curation::{DEFAULT_FAVORITES_LIMIT, MAX_FAVORITES_LIMIT},
    error,
    server::{self, AppState},
    types::TimeRange,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web service
    Serve,

    /// List the genres of a playlist
    Genres(GenresOptions),

    /// Build a set from a playlist
    CreateSet(CreateSetOptions),

    /// Build a playlist from your top tracks
    Favorites(FavoritesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenresOptions {
    /// Source playlist id
    playlist_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateSetOptions {
    /// Source playlist id
    #[clap(long)]
    playlist: String,

    /// Name of the new playlist
    #[clap(long)]
    name: String,

    /// Comma separated genres to keep
    #[clap(long)]
    genres: Option<String>,

    /// Target length in minutes
    #[clap(long)]
    duration: Option<u32>,

    /// Make the new playlist public
    #[clap(long)]
    public: bool,

    /// Seed for a reproducible selection
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct FavoritesOptions {
    /// Name of the new playlist
    #[clap(long)]
    name: String,

    /// Number of top tracks
    #[clap(long, default_value_t = DEFAULT_FAVORITES_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FAVORITES_LIMIT)))]
    limit: u32,

    /// Time range: short_term, medium_term or long_term
    #[clap(long, default_value = "medium_term")]
    range: TimeRange,

    /// Make the new playlist public
    #[clap(long)]
    public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    match cli.command {
        Command::Serve => {
            if let Err(e) = server::start_api_server(AppState::new(cfg)).await {
                error!("Server stopped: {}", e);
            }
        }
        Command::Genres(opt) => cli::genres(&cfg, &opt.playlist_id).await,
        Command::CreateSet(opt) => {
            cli::create_set(
                &cfg,
                cli::SetOptions {
                    playlist_id: opt.playlist,
                    name: opt.name,
                    genres: opt.genres,
                    duration: opt.duration,
                    public: opt.public,
                    seed: opt.seed,
                },
            )
            .await
        }
        Command::Favorites(opt) => {
            cli::favorites(&cfg, opt.name, opt.limit, opt.range, opt.public).await
        }
        Command::Completions(_) => {}
    }
}
