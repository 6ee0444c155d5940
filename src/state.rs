use crate::config::Config;
use crate::tracker::FastSession;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<Mutex<Option<FastSession>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn current(&self) -> Option<FastSession> {
        *self.session.lock().await
    }
}
