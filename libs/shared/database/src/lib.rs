pub mod sqlite;

pub use sqlite::{connect, connect_with_settings, init_schema, DbPool};
