use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use reqwest::header;
use resume_gate::config::ServerConfig;
use resume_gate::web::{ApiState, api::router};
use tempfile::NamedTempFile;
use tokio::task::JoinHandle;

use super::api_client::ApiClient;
use super::{Outbox, RESUME_CONTENT, RecordingMailer};

/// A server running on an ephemeral port with an in-memory outbox.
pub struct TestContext {
    pub api: ApiClient,
    pub client: reqwest::Client,
    pub outbox: Outbox,
    _resume: NamedTempFile,
    server: JoinHandle<()>,
}

impl TestContext {
    pub async fn start(vars: &[(&str, &str)]) -> Self {
        let mut resume = tempfile::Builder::new()
            .prefix("resume")
            .suffix(".pdf")
            .tempfile()
            .expect("Failed to create resume file");
        resume
            .write_all(RESUME_CONTENT)
            .expect("Failed to write resume file");

        let mut env: HashMap<String, String> = HashMap::from([
            ("RESUME_GATE_BIND".to_string(), "127.0.0.1:0".to_string()),
            ("COOKIE_SECURE".to_string(), "false".to_string()),
            (
                "RESUME_PATH".to_string(),
                resume.path().display().to_string(),
            ),
        ]);
        env.extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let config =
            ServerConfig::from_lookup(|var| env.get(var).cloned()).expect("Invalid test config");
        let outbox = Arc::new(RecordingMailer::default());
        let state = ApiState::with_mailer(&config, outbox.clone()).expect("Invalid auth config");

        let listener = tokio::net::TcpListener::bind(config.bind)
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let app = router(state, None);
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            api: ApiClient {
                url: format!("http://{addr}/v1"),
            },
            client: Self::client(true),
            outbox,
            _resume: resume,
            server,
        }
    }

    pub fn client(cookie_store: bool) -> reqwest::Client {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "content-type",
            header::HeaderValue::from_static("application/json"),
        );
        reqwest::ClientBuilder::new()
            .default_headers(headers)
            .cookie_store(cookie_store)
            .build()
            .expect("Failed to build reqwest Client")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}
