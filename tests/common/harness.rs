//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clarity::llm::MockGenerator;
use clarity::{AnalyzerSettings, AppState, ExamAnalyzer, ModelRegistry, create_router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::fixtures;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServerConfig {
    pub generator: Arc<MockGenerator>,
    /// `None` → stub encoders.
    pub registry: Option<ModelRegistry>,
    pub max_document_bytes: Option<usize>,
}

impl TestServerConfig {
    pub fn new(generator: Arc<MockGenerator>) -> Self {
        Self {
            generator,
            registry: None,
            max_document_bytes: None,
        }
    }

    pub fn registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn max_document_bytes(mut self, bytes: usize) -> Self {
        self.max_document_bytes = Some(bytes);
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => tokio::time::sleep(interval).await,
        }
    }
}

/// Spawns a server on an ephemeral port with a scripted generator.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let registry = match config.registry {
        Some(registry) => registry,
        None => ModelRegistry::stub()
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    };

    let mut settings: AnalyzerSettings = fixtures::settings();
    if let Some(bytes) = config.max_document_bytes {
        settings.max_document_bytes = bytes;
    }

    let analyzer = ExamAnalyzer::new(config.generator, registry, settings);
    let app = create_router(AppState::new(Arc::new(analyzer)));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
