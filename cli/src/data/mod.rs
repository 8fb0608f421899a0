pub mod sqlite;

pub use sqlite::{SqliteSource, TableLayout};
