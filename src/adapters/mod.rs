// Adapters layer: concrete implementations of the domain ports (database, terminal).

pub mod sqlite;
pub mod terminal;

pub use sqlite::SqliteDatabase;
pub use terminal::TerminalPresenter;
