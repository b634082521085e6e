use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use trackfetch::{BatchDownloadResult, Config, Source, TrackFetcher};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "trackfetch-cli")]
#[command(about = "Scrape catalog tracks, match them on YouTube and download audio", long_about = None)]
struct Cli {
    /// Directory holding tracklists and intermediate files
    #[arg(long, env = "TRACKFETCH_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Output directory for downloads
    #[arg(short, long, env = "TRACKFETCH_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// yt-dlp executable
    #[arg(long = "yt-dlp", env = "YT_DLP_PATH", default_value = "yt-dlp")]
    yt_dlp: PathBuf,

    /// Pause between requests, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Do not write catalog metadata into downloaded files
    #[arg(long)]
    no_tags: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum SourceArg {
    Beatport,
    Spotify,
}

impl From<SourceArg> for Source {
    fn from(s: SourceArg) -> Self {
        match s {
            SourceArg::Beatport => Source::Beatport,
            SourceArg::Spotify => Source::Spotify,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every catalog URL in tracklist.txt
    Extract,
    /// Search YouTube for each track of a source
    Search {
        /// Source of tracks to search
        #[arg(value_enum)]
        source: SourceArg,
    },
    /// Download matched tracks of a source as audio
    Download {
        /// Source of tracks to download
        #[arg(value_enum)]
        source: SourceArg,
    },
    /// Download the given video URLs as audio
    Fetch {
        /// Video URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = Config::default()
        .with_data_dir(&cli.data_dir)
        .with_output_dir(&cli.output_dir)
        .with_ytdlp_program(&cli.yt_dlp)
        .with_request_delay(Duration::from_millis(cli.delay_ms))
        .with_embed_tags(!cli.no_tags);

    let fetcher = TrackFetcher::new(config)?;

    match cli.command {
        Commands::Extract => {
            let tracks = fetcher.extract_tracklist().await?;

            println!("\n{}", "=".repeat(80));
            println!("EXTRACTED TRACK INFORMATION");
            println!("{}", "=".repeat(80));

            for (i, track) in tracks.iter().enumerate() {
                println!("{:2}. {}", i + 1, track.title);
                println!("    Artist: {}", track.artist);
                println!("    Duration: {}", track.duration);
                println!("    URL: {}", track.url.as_deref().unwrap_or(""));
                println!();
            }

            println!("Results saved to:");
            println!("- {}", fetcher.config().extracted_tracks_json().display());
            println!("- {}", fetcher.config().extracted_tracks_csv().display());
        }
        Commands::Search { source } => {
            let report = fetcher.search_source(source.into()).await?;

            println!("\n{}", "=".repeat(60));
            println!("{} RESULTS SUMMARY", report.source.label().to_uppercase());
            println!("{}", "=".repeat(60));
            println!("Total tracks processed: {}", report.total);
            println!("Successful duration matches: {}", report.matched);
            println!("Match rate: {:.1}%", report.match_rate());
            println!("\nResults saved to:");
            println!("- {}", report.output.display());
        }
        Commands::Download { source } => {
            let result = fetcher.download_source(source.into()).await?;
            print_summary(&result);
        }
        Commands::Fetch { urls } => {
            let result = fetcher.download_urls(&urls).await?;
            print_summary(&result);
        }
    }

    Ok(())
}

fn print_summary(result: &BatchDownloadResult) {
    println!("\n--- Download Summary ---");
    println!("Output: {}", result.directory.display());
    println!("Successful: {}", result.successful.len());
    println!("Failed: {}", result.failed.len());

    if !result.failed.is_empty() {
        println!("\nFailed downloads:");
        for (url, err) in &result.failed {
            println!("  {}: {}", url, err);
        }
    }
}
