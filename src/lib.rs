//! КБЖУ Tracker
//!
//! Client side of a food-photo nutrition tracker: pick or drop a photo, preview
//! it, send it for analysis and show calories, proteins, fats and carbs.

pub mod analyzer;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod render;
pub mod selection;
pub mod state;

pub use analyzer::{default_analyzer, Analyzer, DefaultAnalyzer, PlaceholderAnalyzer, RemoteAnalyzer};
pub use config::Config;
pub use controller::{AnalysisTicket, UploadAnalysisController};
pub use error::{AppError, AppResult};
pub use models::{AnalysisResult, Confidence};
pub use render::ResultView;
pub use selection::SelectedImage;
pub use state::{UiEvent, UiState};
