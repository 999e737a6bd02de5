mod fetch;
mod llm;
mod scout;
mod search;
mod summarize;
mod text;
mod transcript;
mod translate;

pub const USER_AGENT: &str = concat!("learnscout/", env!("CARGO_PKG_VERSION"));

use std::io::Read;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Client;
use tracing::{info, warn};

use fetch::PageFetcher;
use llm::GeminiClient;
use scout::types::ScoutRequest;
use search::SerperClient;
use summarize::StubSummarizer;
use transcript::TranscriptClient;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

/// Discover and enrich learning resources.
///
/// Configuration via environment variables:
/// - `SERPER_API_KEY`: required for the `find` command
/// - `GEMINI_API_KEY`: enables summarization/translation (optional for `find`)
/// - `GEMINI_MODEL`: overrides the default model (optional)
#[derive(Parser)]
#[command(name = "learnscout", version, about = "Find and enrich learning resources for a topic")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the web for learning resources on a topic
    Find {
        /// Topic to find learning material for
        topic: String,
        /// Target language code for summaries and transcripts
        #[arg(long, default_value = "en")]
        language: String,
        /// Difficulty level hint (school, college, beginner, advanced)
        #[arg(long, default_value = "beginner")]
        level: String,
        /// How many search results to request
        #[arg(long, default_value_t = 8)]
        num_results: u32,
        /// Fetch page text and summarize each resource
        #[arg(long)]
        enrich: bool,
        /// Exclude video results
        #[arg(long)]
        no_videos: bool,
        /// Print the resource list as JSON instead of formatted text
        #[arg(long)]
        json: bool,
        /// Print only the result URLs, one per line
        #[arg(long, conflicts_with_all = ["enrich", "json"])]
        urls: bool,
    },
    /// Translate and simplify an explanation for a target audience
    Simplify {
        /// Text to simplify; read from stdin when omitted
        #[arg(long)]
        text: Option<String>,
        /// Target language code
        #[arg(long, default_value = "hi")]
        to: String,
        /// Target difficulty level
        #[arg(long, default_value = "school")]
        level: String,
        /// Topic the text belongs to, used as prompt context
        #[arg(long)]
        topic: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("learnscout=info".parse()?),
        )
        .init();

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;

    match Cli::parse().command {
        Command::Find {
            topic,
            language,
            level,
            num_results,
            enrich,
            no_videos,
            json,
            urls,
        } => {
            let req = ScoutRequest {
                topic,
                language,
                level,
                num_results,
                enrich,
                include_videos: !no_videos,
            };
            if urls {
                run_list_urls(http, &req).await?;
            } else {
                run_find(http, req, json).await?;
            }
        }
        Command::Simplify {
            text,
            to,
            level,
            topic,
        } => {
            let input = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            run_simplify(http, &input, &to, &level, topic.as_deref()).await?;
        }
    }

    Ok(())
}

async fn run_list_urls(http: Client, req: &ScoutRequest) -> Result<(), Box<dyn std::error::Error>> {
    use search::WebSearch;

    let serper = SerperClient::from_env(http)?;
    let query = scout::build_query(&req.topic, &req.level);
    let data = serper.search(&query, req.num_results).await?;

    for url in search::mapper::result_urls(&data) {
        println!("{url}");
    }
    Ok(())
}

async fn run_find(
    http: Client,
    req: ScoutRequest,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let serper = SerperClient::from_env(http.clone())?;
    let fetcher = PageFetcher::new(http.clone());
    let transcripts = TranscriptClient::new(http.clone());

    // Summarization degrades to placeholder output without credentials;
    // the search backend does not.
    let resources = match GeminiClient::from_env(http) {
        Ok(gemini) => scout::discover(&serper, &fetcher, &transcripts, &gemini, &req).await?,
        Err(e) => {
            warn!("model backend not available: {e}; summaries will be placeholders");
            scout::discover(&serper, &fetcher, &transcripts, &StubSummarizer, &req).await?
        }
    };

    info!(topic = %req.topic, count = resources.len(), "discovery complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&resources)?);
    } else {
        println!(
            "Found {} resources for topic '{}':\n",
            resources.len(),
            req.topic
        );
        print!("{}", scout::format_resources(&resources));
    }

    Ok(())
}

async fn run_simplify(
    http: Client,
    text: &str,
    to: &str,
    level: &str,
    topic: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let gemini = GeminiClient::from_env(http)?;

    let result = translate::translate_and_simplify(&gemini, text, to, level, topic).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
