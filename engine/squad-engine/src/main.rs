use clap::Parser;
use squad_engine::cli::Cli;
use squad_engine::{EngineConfig, PlayerPool, RecommendationEngine};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting squad engine v{}", squad_engine::VERSION);

    let config = EngineConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let engine = RecommendationEngine::new(config)?;
    let pool = PlayerPool::load_from_file(&cli.pool)?;
    let ctx = pool.context(cli.wildcard);

    if ctx.deadline_passed(chrono::Utc::now()) {
        warn!("Deadline {:?} has already passed for GW{:?}", ctx.deadline, ctx.gameweek);
    }

    let result = match cli.scenario_override()? {
        Some(scenario) => {
            engine.recommend_for_scenario(&pool.players, &ctx, scenario, cli.variant())
        }
        None => engine.recommend(&pool.players, &ctx, cli.variant()),
    };

    let recommendation = match result {
        Ok(recommendation) => recommendation,
        Err(e) => {
            error!("Failed to recommend squad: {}", e);
            return Err(e.into());
        }
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&recommendation)?
    } else {
        serde_json::to_string(&recommendation)?
    };
    println!("{output}");

    info!(
        "Recommended {} players under {} scenario",
        recommendation.squad.total_selected(),
        recommendation.scenario
    );
    Ok(())
}
