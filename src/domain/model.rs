use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Surrogate key of a department, role or employee row.
pub type RecordId = i64;

/// One result row, columns kept in select order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(Value::as_i64)
    }

    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// Result of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    pub affected: usize,
    pub last_insert_id: RecordId,
}

/// What an action hands back to the navigator: a confirmation line and,
/// for views, the rows to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub message: String,
    pub rows: Option<Vec<Row>>,
}

impl Outcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rows: None,
        }
    }

    pub fn table(message: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            message: message.into(),
            rows: Some(rows),
        }
    }
}
