pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{SqliteDatabase, TerminalPresenter};
pub use crate::core::navigation::{MenuState, Navigator};
pub use crate::utils::error::{Result, TrackerError};
