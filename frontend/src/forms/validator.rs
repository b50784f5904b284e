use thiserror::Error;

use super::rules::{FieldInput, FieldRule, RuleTable};
use super::snapshot::FormSnapshot;

/// Why a single field failed validation. These are ordinary return values
/// carrying the text shown in the field's feedback slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{message}")]
    EmptyRequiredField { message: &'static str },
    #[error("{message}")]
    TooShort { min: usize, message: &'static str },
    #[error("{message}")]
    TooLong { max: usize, message: &'static str },
    #[error("{message}")]
    PatternMismatch { message: &'static str },
    #[error("{message}")]
    MismatchedConfirmation { other: &'static str, message: &'static str },
    #[error("{message}")]
    NotAccepted { message: &'static str },
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::EmptyRequiredField { message }
            | FieldError::TooShort { message, .. }
            | FieldError::TooLong { message, .. }
            | FieldError::PatternMismatch { message }
            | FieldError::MismatchedConfirmation { message, .. }
            | FieldError::NotAccepted { message } => *message,
        }
    }
}

/// Result of validating every registered field of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormVerdict {
    pub results: Vec<(&'static str, Result<(), FieldError>)>,
}

impl FormVerdict {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &FieldError)> + '_ {
        self.results
            .iter()
            .filter_map(|(field, result)| result.as_ref().err().map(|err| (*field, err)))
    }
}

#[derive(Debug, Clone)]
pub struct FieldValidator {
    rules: RuleTable,
}

impl FieldValidator {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| rule)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|(name, _)| *name)
    }

    /// Validates one field against the current values of its form. The first
    /// failing check wins; fields without a rule are always valid.
    pub fn validate(&self, field: &str, snapshot: &FormSnapshot) -> Result<(), FieldError> {
        let Some(rule) = self.rule(field) else {
            return Ok(());
        };
        let value = snapshot.text(field).trim();
        // Counted in UTF-16 units, as the browser reports an input's length.
        let length = value.encode_utf16().count();

        if rule.required && value.is_empty() {
            return Err(FieldError::EmptyRequiredField {
                message: rule.empty_message(),
            });
        }
        // Remaining text checks only apply to something that was entered.
        if !value.is_empty() {
            if let Some(min) = rule.min_length {
                if length < min {
                    return Err(FieldError::TooShort { min, message: rule.message });
                }
            }
            if let Some(max) = rule.max_length {
                if length > max {
                    return Err(FieldError::TooLong { max, message: rule.message });
                }
            }
            if let Some(pattern) = rule.pattern {
                if !pattern.is_match(value) {
                    return Err(FieldError::PatternMismatch { message: rule.message });
                }
            }
            if let Some(other) = rule.match_field {
                if value != snapshot.text(other) {
                    return Err(FieldError::MismatchedConfirmation {
                        other,
                        message: rule.message,
                    });
                }
            }
        }
        if rule.input == FieldInput::Checkbox && !snapshot.is_checked(field) {
            return Err(FieldError::NotAccepted { message: rule.message });
        }
        Ok(())
    }

    pub fn validate_form(&self, snapshot: &FormSnapshot) -> FormVerdict {
        FormVerdict {
            results: self
                .fields()
                .map(|field| (field, self.validate(field, snapshot)))
                .collect(),
        }
    }
}
