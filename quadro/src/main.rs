//! Quadro - CSV analysis agent API with chart synthesis.
//!
//! # Usage
//!
//! ```bash
//! # Start the API with defaults (127.0.0.1:8001, Groq provider)
//! quadro
//!
//! # Custom bind address and configuration file
//! quadro --host 0.0.0.0 --port 8080 --config quadro.toml
//! ```
//!
//! Endpoints: `POST /upload` (CSV multipart), `POST /ask` (form field
//! `pergunta`), `GET /current`, `GET /`.

use anyhow::{Context, Result};
use clap::Parser;
use quadro::api::{self, AppContext};
use quadro::config::AppConfig;
use quadro_agent::agent::AnalysisAgent;
use quadro_agent::providers::create_provider;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadro")]
#[command(about = "API de análise de CSV com síntese de gráficos", long_about = None)]
#[command(version)]
struct Cli {
    /// Bind address (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides configuration)
    #[arg(long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("falha ao carregar a configuração")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let provider =
        create_provider(&config.provider).context("falha ao criar o provedor de linguagem")?;
    info!(model = provider.model(), "provedor de linguagem pronto");

    tokio::fs::create_dir_all(&config.files.dir)
        .await
        .with_context(|| {
            format!(
                "falha ao criar o diretório de arquivos {}",
                config.files.dir.display()
            )
        })?;

    let agent = Arc::new(AnalysisAgent::new(provider, config.agent.clone()));
    let context = AppContext {
        agent,
        files_dir: config.files.dir.clone(),
    };
    let app = api::router(context, &config.cors.allow_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("falha ao escutar em {addr}"))?;
    info!("API disponível em http://{addr}");

    axum::serve(listener, app)
        .await
        .context("servidor encerrou com erro")?;
    Ok(())
}
