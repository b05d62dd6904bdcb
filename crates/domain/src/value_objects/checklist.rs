//! Checklist and reason attached to an appointment
//!
//! The checklist is replaced wholesale on update; there is no per-item patching.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length of a single task description
const MAX_TASK_LENGTH: usize = 1000;

/// Maximum length of an appointment reason
const MAX_REASON_LENGTH: usize = 500;

// ============================================================================
// TaskDescription
// ============================================================================

/// Free text of a checklist item (non-empty, <=1000 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDescription(String);

impl TaskDescription {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Task cannot be empty"));
        }
        if trimmed.chars().count() > MAX_TASK_LENGTH {
            return Err(DomainError::validation(format!(
                "Task cannot exceed {} characters",
                MAX_TASK_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TaskDescription {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TaskDescription> for String {
    fn from(task: TaskDescription) -> String {
        task.0
    }
}

// ============================================================================
// ChecklistItem / Checklist
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub description: TaskDescription,
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(description: impl Into<String>, completed: bool) -> Result<Self, DomainError> {
        Ok(Self {
            description: TaskDescription::new(description)?,
            completed,
        })
    }

    pub fn pending(description: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(description, false)
    }
}

/// Ordered list of tasks for an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist(Vec<ChecklistItem>);

impl Checklist {
    pub fn new(items: Vec<ChecklistItem>) -> Self {
        Self(items)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a checklist of open tasks from raw descriptions.
    pub fn from_descriptions<I, S>(descriptions: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        descriptions
            .into_iter()
            .map(ChecklistItem::pending)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|item| item.completed).count()
    }

    pub fn pending_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.0.iter().filter(|item| !item.completed)
    }

    /// Vacuously true for an empty checklist.
    pub fn is_fully_completed(&self) -> bool {
        self.0.iter().all(|item| item.completed)
    }

    pub fn with_all_completed(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|item| ChecklistItem {
                    description: item.description.clone(),
                    completed: true,
                })
                .collect(),
        )
    }
}

// ============================================================================
// Reason
// ============================================================================

/// Why the appointment was requested (non-empty, <=500 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reason(String);

impl Reason {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Reason cannot be empty"));
        }
        if trimmed.chars().count() > MAX_REASON_LENGTH {
            return Err(DomainError::validation(format!(
                "Reason cannot exceed {} characters",
                MAX_REASON_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Blank input means "no reason".
    pub fn optional(text: Option<String>) -> Result<Option<Self>, DomainError> {
        match text {
            Some(text) if !text.trim().is_empty() => Self::new(text).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Reason {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Reason> for String {
    fn from(reason: Reason) -> String {
        reason.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_description_is_trimmed_and_bounded() {
        assert_eq!(TaskDescription::new("  read ch. 3 ").unwrap().as_str(), "read ch. 3");
        assert!(TaskDescription::new("   ").is_err());
        assert!(TaskDescription::new("x".repeat(1000)).is_ok());
        assert!(TaskDescription::new("x".repeat(1001)).is_err());
    }

    #[test]
    fn checklist_from_descriptions_fails_on_any_bad_item() {
        let list = Checklist::from_descriptions(["algebra", "geometry"]).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.completed_count(), 0);
        assert!(Checklist::from_descriptions(["ok", ""]).is_err());
    }

    #[test]
    fn completion_queries() {
        let list = Checklist::new(vec![
            ChecklistItem::new("a", true).unwrap(),
            ChecklistItem::new("b", false).unwrap(),
        ]);
        assert!(!list.is_fully_completed());
        assert_eq!(list.pending_items().count(), 1);

        let done = list.with_all_completed();
        assert!(done.is_fully_completed());
        assert_eq!(done.completed_count(), 2);
        assert!(Checklist::empty().is_fully_completed());
    }

    #[test]
    fn checklist_serializes_as_plain_array() {
        let list = Checklist::from_descriptions(["review"]).unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "description": "review", "completed": false }])
        );
        let back: Checklist = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn reason_optional_treats_blank_as_none() {
        assert_eq!(Reason::optional(None).unwrap(), None);
        assert_eq!(Reason::optional(Some("  ".into())).unwrap(), None);
        assert_eq!(
            Reason::optional(Some(" exam prep ".into())).unwrap().unwrap().as_str(),
            "exam prep"
        );
        assert!(Reason::new("x".repeat(501)).is_err());
    }
}
