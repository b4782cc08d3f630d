use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn, Level};

use nb_core::sample::SAMPLE_ARTICLE;
use nb_core::{HistoryStore, Result};
use nb_inference::{create_model, Config, InferenceConfig, ModelBackend, SummaryPipeline};
use nb_web::AppState;

mod duration;
mod render;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn long news articles into quick, readable summaries", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "gemini", help = "Model to use for inference. Available models: gemini (default), dummy")]
    model: ModelBackend,
    /// API key for the generative model
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Base URL of the generative model API
    #[arg(long, env = "NEWSBITE_MODEL_URL")]
    model_url: Option<String>,
    /// Model identifier, e.g. gemini-2.5-flash
    #[arg(long)]
    model_name: Option<String>,
    /// Give up on the model after this long (e.g. 30s, 1m30s)
    #[arg(long)]
    timeout: Option<HumanDuration>,
    #[arg(long, default_value = "file", help = "History storage. Available backends: file (default), memory")]
    storage: String,
    #[arg(long, default_value = ".newsbite")]
    history_dir: PathBuf,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
    /// Summarize an article read from a file, or from stdin when no file is given
    Summarize {
        #[arg(conflicts_with = "sample")]
        path: Option<PathBuf>,
        /// Summarize the bundled sample article
        #[arg(long)]
        sample: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Do not record the summary in history
        #[arg(long)]
        no_history: bool,
    },
    /// Show or clear recent summaries
    History {
        #[command(subcommand)]
        command: Option<HistoryCommands>,
    },
    /// Print the bundled sample article
    Sample,
}

#[derive(clap::Subcommand, Debug)]
enum HistoryCommands {
    List,
    Show { id: String },
    Clear,
}

impl Cli {
    fn inference_config(&self) -> Config {
        Config {
            backend: self.model,
            api_key: self.api_key.clone(),
            model_name: self.model_name.clone(),
            inference_config: InferenceConfig {
                model_url: self.model_url.clone(),
                request_timeout: self.timeout.map(|t| t.0),
                ..InferenceConfig::default()
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_article(path: Option<&Path>) -> Result<String> {
    let text = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read article from {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read article from stdin")?;
            text
        }
    };
    Ok(text)
}

async fn create_pipeline(cli: &Cli) -> Result<SummaryPipeline> {
    let config = cli.inference_config();
    if config.backend == ModelBackend::Gemini && config.api_key.is_none() {
        warn!("⚠️ GEMINI_API_KEY is not configured; summarize requests will fail");
    }
    let model = create_model(&config)?;
    info!("🧠 Inference model initialized (using {})", model.name());
    Ok(SummaryPipeline::new(model))
}

async fn open_history(cli: &Cli) -> Result<Arc<dyn HistoryStore>> {
    nb_storage::create_storage(cli.storage.as_str(), Some(cli.history_dir.as_path())).await
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Serve { addr } => {
            let pipeline = create_pipeline(&cli).await?;
            let history = open_history(&cli).await?;
            info!("🏦 History storage initialized (using {})", cli.storage);
            nb_web::serve(AppState { pipeline, history }, addr).await?;
        }
        Commands::Summarize {
            path,
            sample,
            json,
            no_history,
        } => {
            let text = if *sample {
                SAMPLE_ARTICLE.to_string()
            } else {
                read_article(path.as_deref())?
            };
            let pipeline = create_pipeline(&cli).await?;
            let summary = pipeline.summarize(&text).await?;
            if !no_history {
                open_history(&cli).await?.record(&summary).await?;
            }
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::render_summary(&summary));
            }
        }
        Commands::History { command } => {
            let history = open_history(&cli).await?;
            match command.as_ref().unwrap_or(&HistoryCommands::List) {
                HistoryCommands::List => {
                    print!("{}", render::render_history(&history.list().await?));
                }
                HistoryCommands::Show { id } => match history.get(id).await? {
                    Some(entry) => print!("{}", render::render_summary(&entry.full_data)),
                    None => {
                        return Err(nb_core::Error::Storage(format!("No history entry with id {}", id)))
                    }
                },
                HistoryCommands::Clear => {
                    history.clear().await?;
                    info!("🧹 History cleared");
                }
            }
        }
        Commands::Sample => print!("{}", SAMPLE_ARTICLE),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::debug!(kind = e.kind().as_str(), error = %e, "Command failed");
        let response = e.to_response();
        match response.details {
            Some(details) => eprintln!("Error: {} ({})", response.error, details),
            None => eprintln!("Error: {}", response.error),
        }
        std::process::exit(1);
    }
}
