use crate::utils::error::{Result, TrackerError};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_INPUT_LENGTH: usize = 1;
pub const MAX_INPUT_LENGTH: usize = 30;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("number pattern is valid"));

/// Field validator handed to the presenter; a rejection makes it ask again.
pub type Validator = fn(&str) -> Result<()>;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Names and titles must be between 1 and 30 characters.
pub fn validate_input(input: &str) -> Result<()> {
    let length = input.chars().count();
    if !(MIN_INPUT_LENGTH..=MAX_INPUT_LENGTH).contains(&length) {
        return Err(TrackerError::validation(
            "input",
            format!(
                "input must be between {} and {} characters",
                MIN_INPUT_LENGTH, MAX_INPUT_LENGTH
            ),
        ));
    }
    Ok(())
}

pub fn validate_number(number: &str) -> Result<()> {
    if !NUMBER_RE.is_match(number) {
        return Err(TrackerError::validation("number", "enter a NUMBER"));
    }
    Ok(())
}

/// Salaries are stored as 64-bit integers, so the digits also have to fit.
pub fn validate_salary(salary: &str) -> Result<()> {
    validate_number(salary)?;
    parse_salary(salary).map(|_| ())
}

pub fn parse_salary(salary: &str) -> Result<i64> {
    salary
        .parse::<i64>()
        .map_err(|_| TrackerError::validation("salary", "salary is too large"))
}

/// Trims a name and collapses every internal whitespace run to one space, so
/// the stored parts join back into the exact full name the resolver splits.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Full names are split on the last space, so a last name has to be one word.
pub fn validate_last_name(last_name: &str) -> Result<()> {
    validate_input(last_name)?;
    if last_name.chars().any(char::is_whitespace) {
        return Err(TrackerError::validation(
            "last name",
            "last name must be a single word",
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::Config {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(TrackerError::Config {
            message: format!(
                "{} must be one of: {} (got '{}')",
                field_name,
                allowed.join(", "),
                value
            ),
        });
    }
    Ok(())
}
