use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No {entity} named '{name}'")]
    NotFound { entity: &'static str, name: String },

    #[error("{matches} {entity} records are named '{name}'")]
    AmbiguousName {
        entity: &'static str,
        name: String,
        matches: usize,
    },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Cannot delete {entity} '{name}': {dependents} {dependent_kind} still depend on it")]
    DeleteBlocked {
        entity: &'static str,
        name: String,
        dependents: i64,
        dependent_kind: &'static str,
    },

    #[error("There are no {entity} to choose from")]
    EmptyChoice { entity: &'static str },

    #[error("{action} failed while trying to {step}: {source}")]
    ActionFailed {
        action: &'static str,
        step: &'static str,
        #[source]
        source: Box<TrackerError>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database connection is no longer usable")]
    ConnectionUnavailable,

    #[error("Input stream closed")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Lookup,
    Input,
    Integrity,
    System,
}

impl TrackerError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TrackerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::Database(_) => ErrorCategory::Data,
            TrackerError::NotFound { .. }
            | TrackerError::AmbiguousName { .. }
            | TrackerError::EmptyChoice { .. } => ErrorCategory::Lookup,
            TrackerError::Validation { .. } => ErrorCategory::Input,
            TrackerError::DeleteBlocked { .. } => ErrorCategory::Integrity,
            TrackerError::ActionFailed { source, .. } => source.category(),
            TrackerError::Config { .. }
            | TrackerError::Io(_)
            | TrackerError::ConnectionUnavailable
            | TrackerError::InputClosed => ErrorCategory::System,
        }
    }

    /// Recoverable errors abort the current action only; the menu loop returns
    /// to the main page afterwards.
    pub fn is_recoverable(&self) -> bool {
        self.category() != ErrorCategory::System
    }

    /// The innermost error, skipping `ActionFailed` wrappers.
    pub fn root(&self) -> &TrackerError {
        match self {
            TrackerError::ActionFailed { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::ActionFailed {
                action,
                step,
                source,
            } => format!(
                "{} was cancelled while trying to {}. {}",
                action,
                step,
                source.user_friendly_message()
            ),
            TrackerError::Database(e) => format!("The database rejected the request ({})", e),
            TrackerError::AmbiguousName { entity, name, .. } => format!(
                "More than one {} is named '{}', pick a unique name first",
                entity, name
            ),
            TrackerError::DeleteBlocked {
                entity,
                name,
                dependents,
                dependent_kind,
            } => format!(
                "The {} '{}' still has {} {}; reassign or delete them first",
                entity, name, dependents, dependent_kind
            ),
            other => other.to_string(),
        }
    }
}

/// Tags a failing step of a multi-statement action.
pub trait StepContext<T> {
    fn step(self, action: &'static str, step: &'static str) -> Result<T>;
}

impl<T> StepContext<T> for Result<T> {
    fn step(self, action: &'static str, step: &'static str) -> Result<T> {
        self.map_err(|e| match e {
            already @ TrackerError::ActionFailed { .. } => already,
            TrackerError::InputClosed => TrackerError::InputClosed,
            source => TrackerError::ActionFailed {
                action,
                step,
                source: Box::new(source),
            },
        })
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
