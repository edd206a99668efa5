pub mod actions;
pub mod forms;
pub mod handlers;
pub mod navigation;
pub mod queries;
pub mod resolver;

pub use crate::domain::model::{Execution, Outcome, RecordId, Row};
pub use crate::domain::ports::{ConfigProvider, Database, Presenter};
pub use crate::utils::error::Result;
