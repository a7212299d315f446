//! Maps lookup errors to skycast_core::AppError for consistent user-facing messages.

mod weather;

pub use weather::to_app_error;
