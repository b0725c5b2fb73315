//! Aggregated field errors.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;

/// Field name → ordered error messages for that field.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Every rule violated by a candidate, grouped by field.
///
/// Fields keep the order in which their first error was recorded, and each
/// field keeps all of its messages in insertion order. Serializes as a plain
/// JSON object (`{"sku": ["..."], "price": ["..."]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: FieldErrors,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Messages recorded for `field`, empty if none.
    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append one message to `field`.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Merge another field→messages mapping, appending to existing fields.
    pub fn add_errors<I, F, M>(&mut self, errors: I)
    where
        I: IntoIterator<Item = (F, M)>,
        F: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        for (field, messages) in errors {
            let entry = self.errors.entry(field.into()).or_default();
            entry.extend(messages.into_iter().map(Into::into));
        }
    }

    /// Merge the output of a `validator` derive.
    ///
    /// Fields are merged in name order since `validator` reports them in a
    /// hash map.
    pub fn merge_field_errors(&mut self, errors: &validator::ValidationErrors) {
        let mut fields: Vec<(String, Vec<String>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => format!("{field} is invalid ({})", e.code),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        self.add_errors(fields);
    }

    /// Turn an invalid result into [`CoreError::Validation`].
    pub fn ensure_valid(self) -> Result<(), CoreError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
