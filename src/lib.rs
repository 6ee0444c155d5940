pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod stages;
pub mod state;
pub mod tracker;
pub mod ui;
pub mod watcher;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use watcher::spawn_stage_watcher;
