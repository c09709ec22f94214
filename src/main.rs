//! Freelancer recommender: train, query and serve skill-based rankings

use anyhow::{Context, Result};
use clap::Parser;
use freelancer_recommender::api::RecommendRequest;
use freelancer_recommender::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use freelancer_recommender::config::{Config, StoreBackend};
use freelancer_recommender::output::formatter_for;
use freelancer_recommender::recommender::{
    ArtifactStore, JsonArtifactStore, ModelRegistry, Retrainer, VocabularyBuilder,
};
use freelancer_recommender::server::{self, AppState};
use freelancer_recommender::service::RecommendationService;
use freelancer_recommender::store::{CsvStore, DataStore, RestStore, SnapshotStore};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Model { action: ModelAction::Info { path } } => {
            let path = path.unwrap_or_else(|| config.model.artifact_path.clone());
            show_model_info(&config, &path)
        }
        Commands::Config { action } => run_config(action, &config, &config_path),
        Commands::Train { output, csv: Some(path), skills_column } => {
            let store = CsvStore::new(path, skills_column);
            let command = Commands::Train { output, csv: None, skills_column: String::new() };
            run_with_store(store, command, config).await
        }
        command => match config.store.backend {
            StoreBackend::Rest => {
                let store = RestStore::from_config(&config.store)
                    .context("Failed to set up the REST data store")?;
                run_with_store(store, command, config).await
            }
            StoreBackend::Snapshot => {
                let store = SnapshotStore::new(config.store.snapshot_dir.clone());
                run_with_store(store, command, config).await
            }
        },
    }
}

async fn run_with_store<S: DataStore + 'static>(
    store: S,
    command: Commands,
    mut config: Config,
) -> Result<()> {
    let store = Arc::new(store);
    let registry = Arc::new(ModelRegistry::new(config.scoring_profile()));

    match command {
        Commands::Train { output, .. } => {
            let path = output.unwrap_or_else(|| config.model.artifact_path.clone());
            let retrainer = build_retrainer(&store, &registry, &config, path.clone());

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .context("Invalid progress template")?,
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner.set_message("Fetching skills and fitting vocabulary...");

            let result = retrainer.retrain().await;
            spinner.finish_and_clear();
            let model = result.context("Training failed")?;

            println!("✅ Model trained and saved to {}", path.display());
            println!("  • Documents: {}", model.document_count);
            println!("  • Vocabulary size: {}", model.vocabulary_size());
            println!("  • Trained at: {}", model.trained_at.to_rfc3339());
        }

        Commands::Recommend { skills, top_n, format } => {
            let format = match format {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let model = JsonArtifactStore
                .load(&config.model.artifact_path)
                .context("No trained model available; run `train` first")?;
            registry.swap(Arc::new(model));

            let service = RecommendationService::new(store, registry, config.scoring.default_top_n);
            let response = service.handle(RecommendRequest::new(skills, top_n)).await;

            let formatter = formatter_for(&format, config.output.color_output);
            print!("{}", formatter.format_response(&response)?);
        }

        Commands::Serve { host, port, retrain_every } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let retrainer = build_retrainer(
                &store,
                &registry,
                &config,
                config.model.artifact_path.clone(),
            );
            match JsonArtifactStore.load(&config.model.artifact_path) {
                Ok(model) => {
                    registry.swap(Arc::new(model));
                }
                Err(e) => {
                    warn!("{}; training a fresh model", e);
                    if let Err(e) = retrainer.retrain().await {
                        warn!("Starting without a model: {}", e);
                    }
                }
            }

            let service = RecommendationService::new(
                Arc::clone(&store),
                Arc::clone(&registry),
                config.scoring.default_top_n,
            );
            let state = Arc::new(AppState::new(service, retrainer));
            let retrain_every = retrain_every
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);

            info!("Starting server on {}:{}", config.server.host, config.server.port);
            server::serve(state, &config.server, retrain_every)
                .await
                .context("Server stopped with an error")?;
        }

        Commands::Model { .. } | Commands::Config { .. } => {
            anyhow::bail!("This command does not use the data store")
        }
    }

    Ok(())
}

fn build_retrainer<S: DataStore>(
    store: &Arc<S>,
    registry: &Arc<ModelRegistry>,
    config: &Config,
    artifact_path: PathBuf,
) -> Retrainer<S, JsonArtifactStore> {
    Retrainer::new(
        Arc::clone(store),
        JsonArtifactStore,
        artifact_path,
        VocabularyBuilder::new(config.model.max_features, config.scoring_profile()),
        Arc::clone(registry),
    )
}

fn show_model_info(config: &Config, path: &std::path::Path) -> Result<()> {
    let model = JsonArtifactStore
        .load(path)
        .with_context(|| format!("Failed to load model from {}", path.display()))?;
    let configured = config.scoring_profile();

    println!("📦 Model: {}\n", path.display());
    println!("Format version: {}", model.format_version);
    println!("Trained at: {}", model.trained_at.to_rfc3339());
    println!("Documents: {}", model.document_count);
    println!("Vocabulary size: {}", model.vocabulary_size());
    println!("Max features: {}", model.vectorizer.max_features());
    println!("\nScoring profile (baked in):");
    println!("  Skills: {:.1}%", model.profile.weights.skills * 100.0);
    println!("  Rating: {:.1}%", model.profile.weights.rating * 100.0);
    println!("  Experience: {:.1}%", model.profile.weights.experience * 100.0);
    println!("  Minimum match: {:.2}", model.profile.min_match_threshold);

    if model.is_stale_against(&configured) {
        println!("\n⚠️  Configuration has a different scoring profile; retrain to apply it");
    }
    Ok(())
}

fn run_config(action: Option<ConfigAction>, config: &Config, config_path: &std::path::Path) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            println!("⚙️  Current Configuration\n");
            println!("Artifact: {}", config.model.artifact_path.display());
            println!("Max features: {}", config.model.max_features);
            println!("\nScoring Weights:");
            println!("  Skills: {:.1}%", config.scoring.skills_weight * 100.0);
            println!("  Rating: {:.1}%", config.scoring.rating_weight * 100.0);
            println!("  Experience: {:.1}%", config.scoring.experience_weight * 100.0);
            println!("  Minimum match: {:.2}", config.scoring.min_match_threshold);
            println!("  Default top N: {}", config.scoring.default_top_n);
            println!("\nStore: {:?}", config.store.backend);
            match config.store.backend {
                StoreBackend::Rest => println!(
                    "  URL: {}",
                    config.store.url.as_deref().unwrap_or("(not set)")
                ),
                StoreBackend::Snapshot => {
                    println!("  Directory: {}", config.store.snapshot_dir.display())
                }
            }
            println!("\nServer: {}:{}", config.server.host, config.server.port);
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::default()
                .save_to(config_path)
                .context("Failed to write configuration")?;
            println!("✅ Configuration reset successfully!");
        }

        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}
