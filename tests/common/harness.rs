//! Test server harness.

use scorer::embedding::{EmbedderConfig, MockEmbedder};
use scorer::gateway::{HandlerState, create_router_with_state};
use scorer::rubric::RubricProvider;
use scorer::scoring::RubricScorer;
use scorer::similarity::{
    EmbeddingSimilarity, SimilarityStrategy, TextSimilarity, build_similarity,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub const DEFAULT_RUBRIC_JSON: &str = r#"{
    "rubric_id": "default",
    "criteria": [
        {
            "id": "c1",
            "name": "Clarity",
            "description": "explains reasoning clearly",
            "weight": 1,
            "keywords": ["reasoning", "clear"],
            "min_words": 5
        },
        {
            "id": "c2",
            "name": "Ownership",
            "description": "",
            "weight": 0,
            "keywords": ["I led"]
        }
    ]
}"#;

pub const BEHAVIORAL_RUBRIC_JSON: &str = r#"{
    "rubric_id": "behavioral",
    "criteria": [
        {"id": "star", "name": "STAR", "keywords": ["situation", "task", "action", "result"], "weight": 3},
        {"id": "impact", "name": "Impact", "description": "quantified business impact", "min_words": 20}
    ]
}"#;

/// Which similarity backs the spawned server.
#[derive(Debug, Clone, Copy, Default)]
pub enum TestSimilarity {
    #[default]
    Lexical,
    /// Hash-seeded stub embeddings.
    StubEmbedding,
    /// Embeddings that always fail.
    FailingEmbedding,
}

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub similarity: TestSimilarity,
    pub rubric_path: Option<PathBuf>,
    pub score_timeout: Duration,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            similarity: TestSimilarity::default(),
            rubric_path: None,
            score_timeout: Duration::from_secs(10),
        }
    }
}

impl TestServerConfig {
    pub fn with_similarity(mut self, similarity: TestSimilarity) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn with_rubric_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rubric_path = Some(path.into());
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
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
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
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

/// Spawns a server backed by temporary rubric files and no external model.
///
/// The temp directory holds `rubric_config.json` (the default rubric) and a
/// `rubrics/` directory containing `behavioral.json`. Pass
/// [`TestServerConfig::with_rubric_path`] to point the default rubric elsewhere.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let temp_dir = TempDir::new()?;
    let default_path = temp_dir.path().join("rubric_config.json");
    std::fs::write(&default_path, DEFAULT_RUBRIC_JSON)?;

    let rubric_dir = temp_dir.path().join("rubrics");
    std::fs::create_dir(&rubric_dir)?;
    std::fs::write(rubric_dir.join("behavioral.json"), BEHAVIORAL_RUBRIC_JSON)?;

    let rubric_path = config.rubric_path.unwrap_or(default_path);
    let provider = RubricProvider::new(rubric_path).with_rubric_dir(rubric_dir);

    let similarity = match config.similarity {
        TestSimilarity::Lexical => {
            build_similarity(SimilarityStrategy::Lexical, &EmbedderConfig::stub())
        }
        TestSimilarity::StubEmbedding => {
            build_similarity(SimilarityStrategy::Embedding, &EmbedderConfig::stub())
        }
        TestSimilarity::FailingEmbedding => {
            let embedder = Arc::new(MockEmbedder::new(8).failing("mock inference failure"));
            Ok(Arc::new(EmbeddingSimilarity::new(embedder)) as Arc<dyn TextSimilarity>)
        }
    }
    .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let state = HandlerState::new(Arc::new(provider), Arc::new(RubricScorer::new(similarity)))
        .with_score_timeout(config.score_timeout);

    let app = create_router_with_state(state);

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
        _temp_dir: temp_dir,
    })
}
