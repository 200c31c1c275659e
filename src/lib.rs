// src/lib.rs
pub mod api;
pub mod app;
pub mod net;
pub mod settings;
pub mod state;
pub mod ui;

pub use app::DeskApp;
pub use settings::Settings;
pub use state::AppState;
