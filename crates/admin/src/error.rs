//! Unified error handling for the admin resource layer.

use std::collections::BTreeMap;

use thiserror::Error;

/// Application-level error type for admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Form submission failed validation; persistence is blocked.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input from the caller (bad filter payload, unknown field).
    #[error("Bad input: {0}")]
    BadInput(String),
}

/// Field-level validation errors, keyed by field name.
///
/// Nested repeater fields use dotted keys (`items.0.qty`). Every message is
/// user-facing and attached to exactly one field; there is no global error
/// bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message to a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    /// Messages for one field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Whether any field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Iterate over `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Convert into a result: `Ok(())` when empty, `Err(self)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field has a message.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error(s) across {} field(s)", self.len(), self.errors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_accumulate() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("slug", "This value is already in use.");
        errors.add("price", "amount may have at most 2 decimal places");
        errors.add("price", "This field is required.");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("price").map(<[String]>::len), Some(2));
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("number", "This value is already in use.");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::NotFound("order 123".to_string());
        assert_eq!(err.to_string(), "Not found: order 123");

        let mut errors = ValidationErrors::new();
        errors.add("title", "This field is required.");
        let err = AdminError::Validation(errors);
        assert!(err.to_string().starts_with("Validation failed:"));
    }
}
