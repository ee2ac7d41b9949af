pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::AppConfig, model::ModelManager, Result};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: &AppConfig) -> Result<Self> {
        let model_mgr = ModelManager::init(config);
        let app_state = AppState::new(model_mgr);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind the listener to {addr}"))?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

pub struct InternalState {
    pub model_mgr: ModelManager,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(model_mgr: ModelManager) -> Self {
        AppState(Arc::new(InternalState { model_mgr }))
    }
}
