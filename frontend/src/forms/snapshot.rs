use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value a checkbox contributes to its form when it has no explicit `value`.
pub const CHECKBOX_FORM_VALUE: &str = "on";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checkbox { checked: bool },
}

impl FieldValue {
    pub fn text(&self) -> &str {
        match self {
            FieldValue::Text(value) => value,
            FieldValue::Checkbox { .. } => CHECKBOX_FORM_VALUE,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checkbox { checked: true })
    }
}

/// Current values of every field in one form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    fields: BTreeMap<String, FieldValue>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_text(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set_text(field, value);
        self
    }

    #[cfg(test)]
    pub fn with_checked(mut self, field: &str, checked: bool) -> Self {
        self.set_checked(field, checked);
        self
    }

    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_checked(&mut self, field: &str, checked: bool) {
        self.fields.insert(field.to_string(), FieldValue::Checkbox { checked });
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Raw (untrimmed) text of a field; missing fields read as empty.
    pub fn text(&self, field: &str) -> &str {
        self.fields.get(field).map(FieldValue::text).unwrap_or("")
    }

    pub fn is_checked(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(FieldValue::is_checked)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_reads_as_its_form_value_regardless_of_state() {
        let snapshot = FormSnapshot::new().with_checked("termsAccepted", false);
        assert_eq!(snapshot.text("termsAccepted"), "on");
        assert!(!snapshot.is_checked("termsAccepted"));
    }

    #[test]
    fn missing_fields_read_as_empty_and_unchecked() {
        let snapshot = FormSnapshot::new();
        assert_eq!(snapshot.text("email"), "");
        assert!(!snapshot.is_checked("termsAccepted"));
    }

    #[test]
    fn payload_serializes_fields_by_name() {
        let snapshot = FormSnapshot::new()
            .with_text("email", "a@b.co")
            .with_checked("termsAccepted", true);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fields": {"email": "a@b.co", "termsAccepted": {"checked": true}}})
        );
    }
}
