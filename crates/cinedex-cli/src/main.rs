use clap::{ArgAction, Parser, Subcommand};
use cinedex_models::Category;
use commands::{browse, clear, config, show, watchlist};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(about = "Cinedex - Discover movies and keep a watchlist from your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Keep the watchlist in memory for this run only
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a curated movie list
    #[command(long_about = "Show one page of a curated list: trending this week, popular, top rated or upcoming. Defaults to popular.")]
    Browse {
        /// trending, popular, top-rated or upcoming
        #[arg(long, short, default_value_t = Category::Popular)]
        category: Category,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },
    /// Show the first titles of every list at once
    #[command(long_about = "Fetch the first page of every curated list concurrently and show the top titles of each.")]
    Home {
        /// Titles per list (defaults to display.home_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search movies by title
    #[command(long_about = "Search movies by title. Use --pages to load several pages in one go; results are appended in order.")]
    Search {
        /// Text to search for
        query: String,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1, conflicts_with = "pages")]
        page: u32,

        /// Load this many pages starting from the first
        #[arg(long)]
        pages: Option<u32>,
    },
    /// List movies of a genre
    Genre {
        /// TMDB genre id (e.g. 28 for Action, 878 for Science Fiction)
        genre_id: u64,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },
    /// Show details for one movie
    #[command(long_about = "Show details for a movie: overview, genres, runtime, budget and revenue, trailer, cast and similar titles, and whether it is on your watchlist.")]
    Show {
        /// TMDB movie id
        movie_id: u64,

        /// Number of cast members to show (defaults to display.cast_limit)
        #[arg(long)]
        cast: Option<usize>,
    },
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Configure the API key and settings
    #[command(long_about = "Manage configuration and the TMDB API key. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear the saved watchlist or stored credentials
    #[command(long_about = "Clear stored data. Use --watchlist to delete the saved watchlist, --credentials to delete the stored API key, or --all to clear both.")]
    Clear {
        /// Clear the watchlist and credentials
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["watchlist", "credentials"])]
        all: bool,

        /// Delete the saved watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Delete stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List saved movies in the order they were added
    List,
    /// Fetch movies by id and add them
    Add {
        #[arg(required = true)]
        movie_ids: Vec<u64>,
    },
    /// Remove movies by id
    Remove {
        #[arg(required = true)]
        movie_ids: Vec<u64>,
    },
    /// Add a movie if it is not saved, remove it otherwise
    Toggle { movie_id: u64 },
    /// Report whether a movie is saved
    Check { movie_id: u64 },
    /// Number of saved movies
    Count,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    #[command(long_about = "Display the current configuration. The API key is masked unless --full is given.")]
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure TMDB access
    #[command(long_about = "Store a TMDB API key and optionally change the API base URL or response language. Create a key at https://www.themoviedb.org/settings/api. Prompts for the key when --api-key is not given.")]
    Tmdb {
        /// TMDB API key (v3); prompts when omitted
        #[arg(long)]
        api_key: Option<String>,

        /// API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Response language, e.g. en-US
        #[arg(long)]
        language: Option<String>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ephemeral = cli.ephemeral;

    let result = match cli.command {
        Commands::Browse { category, page } => browse::run_browse(category, page, ephemeral, &output).await,
        Commands::Home { limit } => browse::run_home(limit, ephemeral, &output).await,
        Commands::Search { query, page, pages } => browse::run_search(query, page, pages, ephemeral, &output).await,
        Commands::Genre { genre_id, page } => browse::run_genre(genre_id, page, ephemeral, &output).await,
        Commands::Show { movie_id, cast } => show::run_show(movie_id, cast, ephemeral, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(cmd, ephemeral, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear { all, watchlist, credentials } => clear::run_clear(all, watchlist, credentials, &output).await,
    };

    if let Err(e) = result {
        output.error(e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
