use clap::{Parser, Subcommand};
use playlist_catalog::{
    ApiKey, Config, DEFAULT_OUTPUT_FILE, PlaylistSource, ProgressEvent, build_catalog,
    default_cache_dir, default_playlists, lookup_video, write_catalog,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Build a season/episode indexed video catalog from YouTube playlists
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Playlist to catalog as SEASON=PLAYLIST_ID; repeat to add more. Replaces the built-in list
    #[arg(long = "playlist", value_name = "SEASON=PLAYLIST_ID")]
    playlists: Vec<PlaylistSource>,

    /// Where to write the catalog document
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Directory for cached API responses (defaults to the system's temporary directory)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a single video and print its metadata
    Video {
        /// YouTube video id
        id: String,
    },
}

/// Handles progress events and prints formatted output to stderr
///
/// Stdout is reserved for the catalog document.
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Started { playlist_count } => {
            eprintln!("Cataloging {} playlist(s)...", playlist_count);
        }
        ProgressEvent::LoadingPlaylist {
            index,
            total,
            season,
            playlist_id,
            cached,
        } => {
            let origin = if cached { "cache" } else { "YouTube" };
            eprintln!(
                "[{}/{}] Season {}: loading playlist {} from {}",
                index + 1,
                total,
                season,
                playlist_id,
                origin
            );
        }
        ProgressEvent::PlaylistCataloged { video_count, .. } => {
            eprintln!("  {} episode(s)", video_count);
        }
        ProgressEvent::PlaylistFailed { reason, .. } => {
            eprintln!("  Skipped: {}", reason);
        }
        ProgressEvent::Complete {
            video_count,
            failure_count,
        } => {
            eprintln!(
                "\nCatalog complete: {} video(s), {} playlist(s) skipped.",
                video_count, failure_count
            );
        }
    }
}

/// Prints a document to stdout followed by a newline
fn echo(document: &[u8]) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(document);
    let _ = writeln!(stdout);
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Nothing is attempted without a credential
    let api_key = match ApiKey::from_env() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let cache_dir = cli.cache_dir.unwrap_or_else(default_cache_dir);

    if let Some(Command::Video { id }) = cli.command {
        match lookup_video(&api_key, &cache_dir, &id) {
            Ok(video) => match serde_json::to_vec_pretty(&video) {
                Ok(document) => echo(&document),
                Err(e) => {
                    eprintln!("Error: Failed to encode video: {}", e);
                    process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let playlists = if cli.playlists.is_empty() {
        default_playlists()
    } else {
        cli.playlists
    };

    let config = match Config::new(api_key, playlists, cache_dir, cli.output) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match build_catalog(&config, handle_progress_event) {
        Ok(report) => {
            let document = write_catalog(&report.result_set, &config.output_path);
            echo(&document);

            for failure in &report.failures {
                eprintln!(
                    "Season {} ({}) missing: {}",
                    failure.season, failure.playlist_id, failure.reason
                );
            }
        }
        Err(e) => {
            eprintln!("\nError while building catalog: {}", e);
            process::exit(1);
        }
    }
}
