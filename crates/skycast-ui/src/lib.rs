pub mod error_mapping;
pub mod models;
pub mod services;
pub mod sink;
pub mod terminal;

pub use models::{SearchPhase, ViewState, WeatherView};
pub use services::{SearchOrchestrator, SearchOutcome, SearchSettings};
pub use sink::ViewSink;
pub use terminal::TerminalSink;
