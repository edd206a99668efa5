use crate::domain::model::{Execution, Row};
use crate::utils::error::Result;
use crate::utils::validation::Validator;
use async_trait::async_trait;
use serde_json::Value;

/// Data access layer. Every statement is parameterized; values are bound
/// positionally from `params`.
#[async_trait]
pub trait Database: Send + Sync {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<Execution>;

    /// Releases the connection. Called once, when the operator exits.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Presentation layer: prompts and table output.
#[async_trait]
pub trait Presenter: Send {
    /// Returns the index of the chosen entry in `choices`.
    async fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize>;

    /// Asks for free text, asking again for as long as `validator` rejects it.
    async fn input(&mut self, message: &str, validator: Option<Validator>) -> Result<String>;

    fn render_table(&mut self, rows: &[Row]);

    fn notify(&mut self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn database_path(&self) -> &str;
    fn create_schema(&self) -> bool;
    fn seed_sample_data(&self) -> bool;
}
