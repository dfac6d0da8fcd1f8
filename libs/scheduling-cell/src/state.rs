// libs/scheduling-cell/src/state.rs
use tokio::sync::Mutex;

use shared_database::DbPool;

/// Shared router state.
///
/// The store has no internal locking and booking is a check-then-insert
/// sequence, so concurrent hosts must serialize write operations.
/// `write_guard` is that mutual-exclusion scope: handlers and the tool
/// dispatcher hold it across each full book/reschedule/cancel call.
pub struct AppState {
    pub pool: DbPool,
    pub write_guard: Mutex<()>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            write_guard: Mutex::new(()),
        }
    }
}
