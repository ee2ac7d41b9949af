//! Spawns the app on a random port with its own temporary data directory.
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use anyhow::Result;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use subscribomat::{
    config::{AppConfig, NetConfig, StoreConfig},
    init_dbg_tracing,
    model::ModelManager,
    App,
};
use tempfile::TempDir;
use tracing::info;

pub struct TestApp {
    pub addr: SocketAddr,
    pub model_mgr: ModelManager,
    pub client: Client,
    pub store_config: StoreConfig,
    // Removed together with the app.
    _data_dir: TempDir,
}

impl TestApp {
    pub fn subscribe_url(&self) -> String {
        format!("http://{}/api/subscribe", self.addr)
    }

    pub async fn post_subscriptions(&self, body: &Value) -> Result<Response> {
        let res = self.client.post(self.subscribe_url()).json(body).send().await?;
        Ok(res)
    }

    pub async fn post_raw(&self, body: &'static str) -> Result<Response> {
        let res = self
            .client
            .post(self.subscribe_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Ok(res)
    }

    /// Posts `body` as is, with the given `Content-Type` or none at all.
    pub async fn post_raw_typed(
        &self,
        body: &'static str,
        content_type: Option<&'static str>,
    ) -> Result<Response> {
        let mut req = self.client.post(self.subscribe_url()).body(body);
        if let Some(content_type) = content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        Ok(req.send().await?)
    }

    pub async fn request_subscriptions(&self, method: Method) -> Result<Response> {
        let res = self
            .client
            .request(method, self.subscribe_url())
            .send()
            .await?;
        Ok(res)
    }

    pub fn data_dir(&self) -> &Path {
        &self.store_config.data_dir
    }

    pub fn subscribers_file(&self) -> PathBuf {
        self.store_config.subscribers_file()
    }

    /// The subscriber list as it is on disk right now, empty if it was never written.
    pub fn persisted(&self) -> Result<Vec<Value>> {
        let path = self.subscribers_file();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

/// A helper function that tries to spawn a separate task to serve our app
/// returning a `TestApp` that knows its address and data directory.
pub async fn spawn_test_app() -> Result<TestApp> {
    spawn_test_app_with(|_| Ok(())).await
}

/// Like `spawn_test_app`, `prepare` gets the data directory before the app starts.
pub async fn spawn_test_app_with<F>(prepare: F) -> Result<TestApp>
where
    F: FnOnce(&Path) -> Result<()>,
{
    init_test_subscriber();

    let data_dir = TempDir::new()?;
    // A not yet existing sub directory, the app has to create it on first write.
    let store_config = StoreConfig {
        data_dir: data_dir.path().join("data"),
        file_name: "subscribers.json".to_string(),
    };
    prepare(&store_config.data_dir)?;

    // Trying to bind port 0 will trigger an OS scan for an available port
    // which will then be bound to the application.
    let config = AppConfig {
        net_config: NetConfig {
            host: [127, 0, 0, 1],
            app_port: 0,
        },
        store_config: store_config.clone(),
    };

    let app = App::build_from_config(&config).await?;
    let addr = app.local_addr()?;
    let model_mgr = app.app_state.model_mgr.clone();
    info!("Listening on {addr}");

    tokio::spawn(subscribomat::serve(app));

    Ok(TestApp {
        addr,
        model_mgr,
        client: Client::new(),
        store_config,
        _data_dir: data_dir,
    })
}
