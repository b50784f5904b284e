//! Visual state of field groups and the form message region, expressed as the
//! CSS classes and element ids the page markup reacts to.

use super::validator::FieldError;

pub const CHECKMARK: &str = "✓";

/// Whether a valid field shows a positive affordance or just clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStyle {
    ClearOnValid,
    Checkmark,
}

/// Which id suffix a form's feedback elements use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSlot {
    Feedback,
    Error,
}

impl FeedbackSlot {
    pub fn element_id(&self, field: &str) -> String {
        match self {
            FeedbackSlot::Feedback => format!("{field}Feedback"),
            FeedbackSlot::Error => format!("{field}Error"),
        }
    }

    fn base_class(&self) -> &'static str {
        match self {
            FeedbackSlot::Feedback => "form-feedback",
            FeedbackSlot::Error => "form-error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldFeedback {
    #[default]
    Neutral,
    Error(&'static str),
    Success,
}

impl FieldFeedback {
    pub fn from_result(result: &Result<(), FieldError>, style: FeedbackStyle) -> Self {
        match (result, style) {
            (Err(err), _) => FieldFeedback::Error(err.message()),
            (Ok(()), FeedbackStyle::Checkmark) => FieldFeedback::Success,
            (Ok(()), FeedbackStyle::ClearOnValid) => FieldFeedback::Neutral,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            FieldFeedback::Neutral => "",
            FieldFeedback::Error(message) => *message,
            FieldFeedback::Success => CHECKMARK,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, FieldFeedback::Neutral)
    }

    pub fn class(&self, slot: FeedbackSlot) -> String {
        let base = slot.base_class();
        match self {
            FieldFeedback::Neutral => base.to_string(),
            FieldFeedback::Error(_) => format!("{base} error"),
            FieldFeedback::Success => format!("{base} success"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGroupState {
    pub focused: bool,
    pub hovered: bool,
    pub feedback: FieldFeedback,
}

impl FieldGroupState {
    pub fn class(&self) -> String {
        let mut classes = vec!["form-group"];
        match self.feedback {
            FieldFeedback::Error(_) => classes.push("error"),
            FieldFeedback::Success => classes.push("success"),
            FieldFeedback::Neutral => {}
        }
        if self.focused {
            classes.push("focused");
        }
        if self.hovered {
            classes.push("hovered");
        }
        classes.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// The aggregate message shown above the submit button. Each shown message
/// carries the ticket its hide timer must present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub text: &'static str,
    pub kind: MessageKind,
    pub visible: bool,
    pub ticket: u64,
}

impl FormMessage {
    pub fn class(&self) -> &'static str {
        match (self.visible, self.kind) {
            (false, _) => "form-messages",
            (true, MessageKind::Success) => "form-message success",
            (true, MessageKind::Error) => "form-message error",
        }
    }
}

/// Everything a page needs to render one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub value: String,
    pub checked: bool,
    pub group_class: String,
    pub feedback_id: String,
    pub feedback_class: String,
    pub feedback_text: &'static str,
    pub feedback_visible: bool,
}
