use crate::stages::Stage;
use crate::state::AppState;
use crate::tracker::{tick, FastSession};
use chrono::Local;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Remembers the last stage seen for a session so transitions are reported once.
#[derive(Debug, Default)]
pub struct StageWatch {
    last: Option<(i64, u32)>,
}

impl StageWatch {
    /// Returns the newly entered stage, if this observation changed it.
    pub fn observe(&mut self, session: Option<&FastSession>, now: i64) -> Option<&'static Stage> {
        let Some(session) = session else {
            self.last = None;
            return None;
        };

        let stage = tick(session, now, &[]).active_stage;
        let key = (session.start_time, stage.threshold_hours);
        if self.last == Some(key) {
            return None;
        }
        self.last = Some(key);
        Some(stage)
    }
}

/// Ticks the current session on the configured interval until `shutdown` resolves.
pub fn spawn_stage_watcher<F>(state: AppState, shutdown: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(state.config.watch_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut watch = StageWatch::default();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("stage watcher stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let session = state.current().await;
                    if let Some(stage) = watch.observe(session.as_ref(), Local::now().timestamp()) {
                        info!(
                            stage = stage.name,
                            threshold_hours = stage.threshold_hours,
                            "fast entered stage"
                        );
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000;

    fn session() -> FastSession {
        FastSession {
            start_time: START,
            goal_hours: 0,
        }
    }

    #[test]
    fn reports_each_stage_once() {
        let mut watch = StageWatch::default();
        let session = session();

        let first = watch.observe(Some(&session), START + 10);
        assert_eq!(first.map(|stage| stage.threshold_hours), Some(0));
        assert!(watch.observe(Some(&session), START + 3 * 3600).is_none());

        let next = watch.observe(Some(&session), START + 4 * 3600);
        assert_eq!(next.map(|stage| stage.threshold_hours), Some(4));
        assert!(watch.observe(Some(&session), START + 4 * 3600 + 1).is_none());
    }

    #[test]
    fn new_session_reports_again() {
        let mut watch = StageWatch::default();
        let session = session();
        assert!(watch.observe(Some(&session), START).is_some());
        assert!(watch.observe(None, START + 60).is_none());
        assert!(watch.observe(Some(&session), START + 120).is_some());
    }

    #[tokio::test]
    async fn watcher_stops_on_shutdown() {
        let mut config = crate::config::Config::default();
        config.watch_interval = std::time::Duration::from_millis(10);
        let state = AppState::new(config);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let handle = spawn_stage_watcher(state, async move {
            let _ = rx.await;
        });
        tx.send(()).unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(2), handle)
            .await
            .expect("watcher did not stop")
            .expect("watcher panicked");
    }
}
