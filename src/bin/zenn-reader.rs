//! Command-line front end: list feed entries or read one article.

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use zenn_reader::feed::{search_entries, FeedFilter, DEFAULT_FEED_COUNT};
use zenn_reader::fetch::{FetchConfig, HttpClient, DEFAULT_TIMEOUT_SECS};
use zenn_reader::format::{format_article_output, format_feed_output, FormatOptions, JsonBody, OutputFormat};
use zenn_reader::{Options, Result};

#[derive(Parser, Debug)]
#[command(name = "zenn-reader")]
#[command(about = "Read Zenn feeds and articles from the terminal")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List articles from a feed
    Feed {
        /// Maximum number of entries
        #[arg(short, long, default_value_t = DEFAULT_FEED_COUNT)]
        count: usize,

        /// Feed type: all, topic or user
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Topic slug or user handle for --type topic/user
        #[arg(short, long)]
        keyword: Option<String>,

        /// Keep entries whose title or author contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output format: text, json or markdown
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Fetch an article and print it
    Article {
        /// Article URL
        url: String,

        /// Output format: text, json or markdown
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Body representation in JSON output: text or markdown
        #[arg(long, default_value = "text")]
        json_body: JsonBody,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    } else {
        EnvFilter::new(default_level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<String> {
    let client = HttpClient::new(&FetchConfig {
        timeout_secs: cli.timeout,
        ..FetchConfig::default()
    });

    match cli.command {
        Commands::Feed { count, kind, keyword, search, format } => {
            let filter = FeedFilter::from_parts(kind.as_deref(), keyword.as_deref())?;
            let mut entries = client.fetch_feed(&filter, count)?;
            if let Some(query) = search.as_deref() {
                entries = search_entries(&entries, query);
            }
            Ok(format_feed_output(&entries, format, Some(&filter.feed_url())))
        }
        Commands::Article { url, format, json_body } => {
            let article = client.fetch_article(&url, &Options::default())?;
            Ok(format_article_output(&article, format, &FormatOptions { json_body }))
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
