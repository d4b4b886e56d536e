//! Exero - Workout Tracking Graph

use clap::Parser;

use exero::config::Config;
use exero::context::Context;
use exero::graph::{backends::Neo4jClient, Graph};
use exero::repositories::SchemaRepository;
use exero::FromRef;

#[derive(Parser)]
#[command(name = "exero")]
#[command(about = "Workout tracking graph - Neo4j persistence for exercises, sessions and records")]
struct Cli {
    /// Run in verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Create the uniqueness constraints for the graph schema
    #[arg(long)]
    init: bool,

    /// Print node counts per label
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = Config::load()?;

    // Connect to Neo4j
    tracing::info!("Connecting to Neo4j at {}", config.neo4j.uri);
    let client = Neo4jClient::connect(
        &config.neo4j.uri,
        &config.neo4j.user,
        config.neo4j.password.as_deref().unwrap_or(""),
    )
    .await?;
    tracing::info!("Connected to Neo4j");

    let ctx = Context::new(Graph::new(client), config);
    let schema = SchemaRepository::from_ref(&ctx);

    if cli.init {
        schema.ensure_constraints().await?;
        tracing::info!("Schema constraints in place");
    }

    if cli.stats {
        let stats = schema.stats().await?;
        println!(
            "exercises: {}\nexercise sessions: {}\nexercise records: {}\nworkout sessions: {}",
            stats.exercise_count,
            stats.session_count,
            stats.record_count,
            stats.workout_session_count
        );
    }

    if !cli.init && !cli.stats {
        tracing::info!("Nothing to do; pass --init or --stats");
    }

    Ok(())
}
