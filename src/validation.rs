// Per-field validation of task input

use std::fmt;
use thiserror::Error;

use crate::models::parse_due_date;

/// Form fields that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    DueDate,
}

impl Field {
    /// Field name as it appears in the serialized record
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All field errors found in one candidate task, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if that field failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.iter().map(|e| e.field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check the user-editable text fields of a task.
///
/// Title and description must be non-empty after trimming. The due date must
/// be present and read as a calendar date.
pub fn validate_fields(title: &str, description: &str, due_date: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if title.trim().is_empty() {
        errors.push(Field::Title, "Title is required");
    }
    if description.trim().is_empty() {
        errors.push(Field::Description, "Description is required");
    }
    if due_date.trim().is_empty() {
        errors.push(Field::DueDate, "Due date is required");
    } else if parse_due_date(due_date).is_none() {
        errors.push(Field::DueDate, "Due date must be a calendar date (YYYY-MM-DD)");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        assert!(validate_fields("Title", "Description", "2025-01-01").is_ok());
    }

    #[test]
    fn test_empty_title_reports_only_title() {
        let errors = validate_fields("", "x", "2025-01-01").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Title), Some("Title is required"));
        assert!(!errors.contains(Field::Description));
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let errors = validate_fields("   ", "\t\n", "2025-01-01").unwrap_err();
        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::Title, Field::Description]);
    }

    #[test]
    fn test_missing_due_date() {
        let errors = validate_fields("a", "b", "").unwrap_err();
        assert_eq!(errors.get(Field::DueDate), Some("Due date is required"));
    }

    #[test]
    fn test_unreadable_due_date() {
        let errors = validate_fields("a", "b", "someday").unwrap_err();
        assert!(errors.get(Field::DueDate).unwrap().contains("calendar date"));
    }

    #[test]
    fn test_display_lists_every_field() {
        let errors = validate_fields("", "", "").unwrap_err();
        assert_eq!(errors.len(), 3);
        let text = errors.to_string();
        assert!(text.contains("title: Title is required"));
        assert!(text.contains("description: Description is required"));
        assert!(text.contains("dueDate: Due date is required"));
    }

    #[test]
    fn test_usable_as_std_error() {
        let errors = validate_fields("", "b", "2025-01-01").unwrap_err();
        let err: &dyn std::error::Error = &errors;
        assert_eq!(err.to_string(), "title: Title is required");
        assert!(err.source().is_none());
    }
}
