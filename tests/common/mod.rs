#![allow(dead_code)]

use async_trait::async_trait;
use employee_tracker::core::{Presenter, Row};
use employee_tracker::utils::validation::Validator;
use employee_tracker::{Result, SqliteDatabase, TrackerError};
use std::collections::VecDeque;

/// One operator answer: a menu option picked by its label, or typed text.
#[derive(Debug, Clone)]
pub enum Answer {
    Pick(String),
    Type(String),
}

pub fn pick(label: &str) -> Answer {
    Answer::Pick(label.to_string())
}

pub fn typed(text: &str) -> Answer {
    Answer::Type(text.to_string())
}

/// Replays scripted answers and records everything shown to the operator.
/// Running out of answers behaves like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
    pub messages: Vec<String>,
    pub tables: Vec<Vec<Row>>,
    pub rejected: Vec<String>,
}

impl ScriptedPresenter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

#[async_trait]
impl Presenter for ScriptedPresenter {
    async fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize> {
        self.prompts.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Pick(label)) => Ok(choices
                .iter()
                .position(|choice| *choice == label)
                .unwrap_or_else(|| panic!("'{}' is not offered by '{}': {:?}", label, message, choices))),
            Some(Answer::Type(text)) => panic!("expected a pick for '{}', got text '{}'", message, text),
            None => Err(TrackerError::InputClosed),
        }
    }

    async fn input(&mut self, message: &str, validator: Option<Validator>) -> Result<String> {
        self.prompts.push(message.to_string());
        loop {
            let text = match self.answers.pop_front() {
                Some(Answer::Type(text)) => text,
                Some(Answer::Pick(label)) => {
                    panic!("expected text for '{}', got pick '{}'", message, label)
                }
                None => return Err(TrackerError::InputClosed),
            };
            match validator.map(|validate| validate(&text)) {
                Some(Err(_)) => self.rejected.push(text),
                _ => return Ok(text),
            }
        }
    }

    fn render_table(&mut self, rows: &[Row]) {
        self.tables.push(rows.to_vec());
    }

    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Empty in-memory directory with the schema applied.
pub fn empty_directory() -> SqliteDatabase {
    let db = SqliteDatabase::open_in_memory().expect("open in-memory database");
    db.apply_schema().expect("apply schema");
    db
}

/// In-memory directory loaded with the bundled sample data.
pub fn sample_directory() -> SqliteDatabase {
    let db = empty_directory();
    db.seed_sample_data().expect("load sample data");
    db
}

pub fn column_values(rows: &[Row], column: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
