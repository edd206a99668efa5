use crate::domain::model::Row;
use crate::domain::ports::Presenter;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::Validator;
use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Interactive presenter over a line-oriented input stream and stdout.
pub struct TerminalPresenter<R> {
    input: R,
}

impl TerminalPresenter<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> TerminalPresenter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    async fn read_answer(&mut self, prompt: &str) -> Result<String> {
        print!("{} ", prompt);
        std::io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(TrackerError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Presenter for TerminalPresenter<R> {
    async fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize> {
        if choices.is_empty() {
            return Err(TrackerError::validation("choice", "nothing to choose from"));
        }

        println!("? {}", message);
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}) {}", i + 1, choice);
        }

        loop {
            let answer = self.read_answer(">").await?;
            match parse_choice(&answer, choices) {
                Some(index) => return Ok(index),
                None => println!(
                    ">> enter a number between 1 and {} or the exact option text",
                    choices.len()
                ),
            }
        }
    }

    async fn input(&mut self, message: &str, validator: Option<Validator>) -> Result<String> {
        loop {
            let answer = self.read_answer(&format!("? {}", message)).await?;
            match validator.map(|validate| validate(&answer)) {
                Some(Err(TrackerError::Validation { message: reason, .. })) => println!(">> {}", reason),
                Some(Err(other)) => return Err(other),
                Some(Ok(())) | None => return Ok(answer),
            }
        }
    }

    fn render_table(&mut self, rows: &[Row]) {
        println!("{}", format_table(rows));
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Accepts a 1-based option number or the option text itself.
pub fn parse_choice(answer: &str, choices: &[String]) -> Option<usize> {
    if let Ok(number) = answer.parse::<usize>() {
        return (1..=choices.len()).contains(&number).then(|| number - 1);
    }
    choices.iter().position(|choice| choice == answer)
}

/// Renders rows as left-aligned columns under a dashed header rule.
pub fn format_table(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return "(no rows)".to_string();
    };

    let headers: Vec<String> = first.columns().map(str::to_string).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.fields.iter().map(|(_, value)| cell(value)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, value) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(value.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_padded(&headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        lines.push(join_padded(row, &widths));
    }
    lines.join("\n")
}

fn join_padded(values: &[String], widths: &[usize]) -> String {
    values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
