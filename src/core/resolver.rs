use crate::core::queries;
use crate::domain::model::{RecordId, Row};
use crate::domain::ports::Database;
use crate::utils::error::{Result, TrackerError};
use serde_json::Value;
use std::fmt;

/// A display name split into the two columns the employee table stores.
///
/// The last whitespace-separated token is the last name and everything before
/// it is the first name. Multi-word last names ("Van Dyke") therefore cannot be
/// told apart from multi-word first names; new employees are required to have a
/// single-word last name so their display names always split back correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName {
    pub first_name: String,
    pub last_name: String,
}

impl FullName {
    pub fn parse(full_name: &str) -> Result<Self> {
        let mut tokens: Vec<&str> = full_name.split_whitespace().collect();
        let last_name = tokens
            .pop()
            .ok_or_else(|| TrackerError::validation("full name", "name cannot be empty"))?;

        Ok(Self {
            first_name: tokens.join(" "),
            last_name: last_name.to_string(),
        })
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_name.is_empty() {
            write!(f, "{}", self.last_name)
        } else {
            write!(f, "{} {}", self.first_name, self.last_name)
        }
    }
}

/// Reduces an id lookup to exactly one id.
pub fn expect_single(rows: &[Row], entity: &'static str, name: &str) -> Result<RecordId> {
    match rows {
        [] => Err(TrackerError::NotFound {
            entity,
            name: name.to_string(),
        }),
        [row] => row.get_i64("id").ok_or_else(|| TrackerError::NotFound {
            entity,
            name: name.to_string(),
        }),
        many => Err(TrackerError::AmbiguousName {
            entity,
            name: name.to_string(),
            matches: many.len(),
        }),
    }
}

pub async fn resolve_employee<D: Database + ?Sized>(db: &D, full_name: &str) -> Result<RecordId> {
    let name = FullName::parse(full_name)?;
    let rows = db
        .query(
            queries::EMPLOYEE_ID_BY_NAME,
            &[
                Value::from(name.first_name.as_str()),
                Value::from(name.last_name.as_str()),
            ],
        )
        .await?;
    let id = expect_single(&rows, "employee", full_name)?;
    tracing::debug!("Resolved employee '{}' to id {}", name, id);
    Ok(id)
}

pub async fn resolve_department<D: Database + ?Sized>(db: &D, name: &str) -> Result<RecordId> {
    let rows = db
        .query(queries::DEPARTMENT_ID_BY_NAME, &[Value::from(name)])
        .await?;
    expect_single(&rows, "department", name)
}

pub async fn resolve_role<D: Database + ?Sized>(db: &D, title: &str) -> Result<RecordId> {
    let rows = db
        .query(queries::ROLE_ID_BY_TITLE, &[Value::from(title)])
        .await?;
    expect_single(&rows, "role", title)
}
