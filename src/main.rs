//! Exam clarity HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use clarity::config::{Config, DEFAULT_PORT};
use clarity::embedding::{BiEncoderConfig, RerankerConfig};
use clarity::gate::ModelRegistry;
use clarity::gateway::{AppState, create_router};
use clarity::llm::GenaiGenerator;
use clarity::remediation::{AnalyzerSettings, ExamAnalyzer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        extract_model = %config.models.extract,
        score_model = %config.models.score,
        rephrase_model = %config.models.rephrase,
        "Exam clarity server starting"
    );

    let bi_encoder_config = BiEncoderConfig::from_path(config.bi_encoder_path.clone());
    let reranker_config = RerankerConfig::from_path(config.cross_encoder_path.clone());
    let registry = tokio::task::spawn_blocking(move || {
        ModelRegistry::load(bi_encoder_config, reranker_config)
    })
    .await??;

    let generator = Arc::new(GenaiGenerator::new(config.llm_timeout));
    let analyzer = ExamAnalyzer::new(generator, registry, AnalyzerSettings::from(&config));

    let app = create_router(AppState::new(Arc::new(analyzer)));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Exam clarity server shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("CLARITY_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
