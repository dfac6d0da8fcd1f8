pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod tools;

// Re-export models and state for external use
pub use models::*;
pub use state::AppState;
