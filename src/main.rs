//! Songkey - music library text tools
//!
//! Name keys, fuzzy scores, library ranking and voice-search queues from the
//! command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use songkey::config::{config_path, Config};
use songkey::labels::{self, EnglishStrings, LabelStrings, TableStrings};
use songkey::library::Library;
use songkey::utils::{adjusted_similarity, find_matches, key_for, similarity};
use songkey::voice_search::VoiceSearch;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the sort/search key of each name
    Key {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Jaro-Winkler similarity of two strings
    Similarity {
        first: String,
        second: String,

        /// Also try each word of FIRST on its own
        #[arg(short, long)]
        adjusted: bool,
    },

    /// Rank library album artists against a query
    Rank {
        query: String,

        #[arg(long)]
        library: Option<PathBuf>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, default_value_t = 0.6)]
        cutoff: f64,
    },

    /// Resolve a voice query to an ordered song queue
    Search {
        query: String,

        #[arg(long)]
        library: Option<PathBuf>,
    },

    /// Format a duration in seconds
    Duration {
        #[arg(allow_negative_numbers = true)]
        secs: i64,
    },

    /// Write the current configuration to the config file
    InitConfig,
}

fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_library(path: Option<PathBuf>, config: &Config) -> Result<Library> {
    let path = path.unwrap_or_else(|| PathBuf::from(&config.library_path));
    Library::load(&path).with_context(|| format!("loading library {}", path.display()))
}

fn load_strings(config: &Config) -> Result<Box<dyn LabelStrings>> {
    if config.strings_path.is_empty() {
        return Ok(Box::new(EnglishStrings));
    }
    let path = Path::new(&config.strings_path);
    let strings = TableStrings::load(path)
        .with_context(|| format!("loading label strings {}", path.display()))?;
    Ok(Box::new(strings))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_file = args.config.clone().unwrap_or_else(config_path);

    // Config decides the log level, so warnings raised while loading it go
    // through a stderr subscriber of their own.
    let bootstrap = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || Config::load_from(&config_file))
        .with_context(|| format!("loading config {}", config_file.display()))?;

    init_logging(args.verbose, &config);
    debug!("Using config {}", config_file.display());

    match args.command {
        Commands::Key { names } => {
            for name in names {
                println!("{}\t{}", key_for(Some(&name)), name);
            }
        }
        Commands::Similarity {
            first,
            second,
            adjusted,
        } => {
            let score = if adjusted {
                adjusted_similarity(Some(&first), Some(&second))
            } else {
                similarity(&first, &second)
            };
            println!("{:.2}", score);
        }
        Commands::Rank {
            query,
            library,
            limit,
            cutoff,
        } => {
            let library = load_library(library, &config)?;
            let names = library.album_artist_names();
            let limit = limit.unwrap_or(config.rank_limit);

            let matches = find_matches(&query, &names, limit, cutoff);
            if matches.is_empty() {
                info!("No album artist scored {:.2} or more for '{}'", cutoff, query);
            }
            for m in matches {
                println!("{:.2}\t{}", m.score, m.value);
            }
        }
        Commands::Search { query, library } => {
            let library = load_library(library, &config)?;
            let strings = load_strings(&config)?;
            let search = VoiceSearch::new(&library, config.search_options());

            let queue = search.resolve(&query);
            let total_secs: i64 = queue.iter().map(|s| s.duration_secs).sum();
            println!(
                "{}",
                labels::make_songs_and_time_label(strings.as_ref(), queue.len() as i64, total_secs)
            );
            for song in &queue {
                println!(
                    "{}-{:02}\t{}\t{}\t{}",
                    song.disc_number,
                    song.track,
                    song.title,
                    song.album,
                    labels::make_time_string(strings.as_ref(), song.duration_secs)
                );
            }
        }
        Commands::Duration { secs } => {
            let strings = load_strings(&config)?;
            println!("{}", labels::make_time_string(strings.as_ref(), secs));
        }
        Commands::InitConfig => {
            config.save_to(&config_file)?;
            info!("✅ Wrote {}", config_file.display());
        }
    }

    Ok(())
}
