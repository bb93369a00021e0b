use anyhow::{Context, Result, bail};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, DataError, Dataset};
use metadata_client::{ClientConfig, MetadataClientError, MetadataProvider, OfflineProvider, TmdbClient};
use recommender::{DEFAULT_RECOMMENDATION_COUNT, RecommendError, SimilaritySource};
use server::{MovieRecommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::warn;

/// ReelRecs - Similar movie recommendations
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Recommend movies similar to one you like, using content similarity", long_about = None)]
struct Cli {
    /// Directory containing movies.dat and similarity.json
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog titles in catalog order
    Titles {
        /// Show at most this many titles
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Get movies similar to a title
    Recommend {
        /// Exact title to get recommendations for
        #[arg(long)]
        title: String,

        /// Number of recommendations to return (at least 1)
        #[arg(
            long,
            default_value_t = DEFAULT_RECOMMENDATION_COUNT,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        limit: usize,

        /// Skip TMDB and show placeholder metadata
        #[arg(long)]
        offline: bool,
    },

    /// Run benchmark to test ranking performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the dataset once; any problem here is fatal
    let start = Instant::now();
    let dataset = Arc::new(
        Dataset::load_from_files(&cli.data_dir)
            .with_context(|| format!("Failed to load dataset from {}", cli.data_dir.display()))?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        dataset.catalog().len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Titles { limit } => handle_titles(dataset.catalog(), limit),
        Commands::Search { title } => handle_search(dataset.catalog(), &title),
        Commands::Recommend {
            title,
            limit,
            offline,
        } => handle_recommend(dataset, &title, limit, offline).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(dataset, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(catalog: &Catalog, limit: Option<usize>) {
    let titles = catalog.all_titles();
    let shown = limit.unwrap_or(titles.len()).min(titles.len());

    for (i, title) in titles.iter().take(shown).enumerate() {
        println!("{:>5}  {}", i, title);
    }
    if shown < titles.len() {
        println!("... and {} more", titles.len() - shown);
    }
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, query: &str) {
    let matches = catalog.search(query);

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if matches.is_empty() {
        println!("  No movies match");
        return;
    }
    for movie in matches.iter().take(20) {
        println!("  {} (TMDB id {})", movie.title, movie.id);
    }
    if matches.len() > 20 {
        println!("  ... and {} more", matches.len() - 20);
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    dataset: Arc<Dataset>,
    title: &str,
    limit: usize,
    offline: bool,
) -> Result<()> {
    let provider = build_provider(offline)?;
    let orchestrator = RecommendationOrchestrator::new(dataset, provider);

    match orchestrator.get_recommendations(title, limit).await {
        Ok(recommendations) => {
            print_recommendations(title, &recommendations);
            Ok(())
        }
        Err(err) => {
            if is_unknown_title(&err) {
                print_suggestions(orchestrator.catalog(), title);
            }
            Err(err)
        }
    }
}

/// Only an unknown title warrants "did you mean" suggestions
fn is_unknown_title(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<RecommendError>(),
        Some(RecommendError::Data(DataError::NotFound { .. }))
    )
}

/// TMDB when configured, offline placeholders otherwise
fn build_provider(offline: bool) -> Result<Arc<dyn MetadataProvider>> {
    if offline {
        return Ok(Arc::new(OfflineProvider::default()));
    }

    let config = ClientConfig::from_env().context("Failed to read TMDB configuration")?;
    match TmdbClient::new(config.clone()) {
        Ok(client) => Ok(Arc::new(client)),
        Err(MetadataClientError::MissingApiKey) => {
            warn!("TMDB_API_KEY is not set, showing recommendations without metadata");
            Ok(Arc::new(OfflineProvider::new(config.placeholder_poster_url)))
        }
        Err(e) => Err(e).context("Failed to create TMDB client"),
    }
}

/// Point the user at titles close to what they typed
fn print_suggestions(catalog: &Catalog, title: &str) {
    println!("{}", format!("No movie titled '{}' in the catalog.", title).red());
    let suggestions = catalog.search(title);
    if !suggestions.is_empty() {
        println!("Did you mean:");
        for movie in suggestions.iter().take(5) {
            println!("  - {}", movie.title);
        }
    }
}

/// Handle the 'benchmark' command
///
/// Measures ranking only; enrichment is network-bound and not included.
async fn handle_benchmark(dataset: Arc<Dataset>, requests: usize, concurrent: usize) -> Result<()> {
    let movie_count = dataset.catalog().len();
    if movie_count == 0 {
        bail!("Cannot benchmark an empty catalog");
    }
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let source = SimilaritySource::new(dataset.clone());
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    // Pick random catalog titles
    let all_titles = dataset.catalog().all_titles();
    let titles: Vec<String> = (0..requests)
        .map(|_| {
            let index = rand::random::<u64>() as usize % movie_count;
            all_titles[index].to_string()
        })
        .collect();

    let wall_clock = Instant::now();
    let mut handles = vec![];
    for title in titles {
        let source = source.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let elapsed = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                source.recommend(&title, DEFAULT_RECOMMENDATION_COUNT)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            })
            .await??;
            Ok::<_, anyhow::Error>(elapsed)
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, recommendations: &[MovieRecommendation]) {
    println!("{}", format!("Movies similar to '{}':", title).bold().blue());

    for (i, rec) in recommendations.iter().enumerate() {
        let rank = i + 1;
        println!(
            "{}. {} - Similarity: {:.3}",
            rank.to_string().green(),
            rec.title.bold(),
            rec.score
        );
        println!("   Year: {}", rec.metadata.year);
        println!("   Genre: {}", rec.metadata.genres);
        println!("   Rating: {}/10", rec.metadata.rating_label());
        println!("   Poster: {}", rec.poster_url);
        match &rec.trailer_url {
            Some(url) => println!("   Trailer: {}", url),
            None => println!("   Trailer not available"),
        }
    }
}
