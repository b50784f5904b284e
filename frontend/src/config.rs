use log::Level;

use crate::forms::feedback::{FeedbackSlot, FeedbackStyle};
use crate::forms::rules::{self, RuleTable};

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose state transitions when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const RESET_DELAY_MS: u32 = 3_000;
pub const SIMULATED_SUCCESS_RATE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Signup,
}

/// Everything that differs between the contact and signup forms.
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    pub kind: FormKind,
    pub form_id: &'static str,
    pub submit_delay_ms: u32,
    pub reset_delay_ms: u32,
    pub message_hide_ms: u32,
    pub success_rate: f64,
    pub feedback_style: FeedbackStyle,
    pub feedback_slot: FeedbackSlot,
    pub tracks_password_strength: bool,
    pub invalid_form_message: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,
}

impl FormConfig {
    pub fn contact() -> Self {
        Self {
            kind: FormKind::Contact,
            form_id: "contactForm",
            submit_delay_ms: 2_000,
            reset_delay_ms: RESET_DELAY_MS,
            message_hide_ms: 5_000,
            success_rate: SIMULATED_SUCCESS_RATE,
            feedback_style: FeedbackStyle::ClearOnValid,
            feedback_slot: FeedbackSlot::Error,
            tracks_password_strength: false,
            invalid_form_message: "لطفاً تمام فیلدهای لازم را به درستی تکمیل کنید / Please fill in all required fields correctly",
            success_message: "پیام شما با موفقیت ارسال شد! تیم ما به زودی با شما تماس خواهد گرفت / Your message has been sent successfully! Our team will contact you soon.",
            failure_message: "خطایی در ارسال پیام رخ داد. لطفاً دوباره تلاش کنید / An error occurred while sending the message. Please try again.",
        }
    }

    pub fn signup() -> Self {
        Self {
            kind: FormKind::Signup,
            form_id: "signupForm",
            submit_delay_ms: 2_500,
            reset_delay_ms: RESET_DELAY_MS,
            message_hide_ms: 6_000,
            success_rate: SIMULATED_SUCCESS_RATE,
            feedback_style: FeedbackStyle::Checkmark,
            feedback_slot: FeedbackSlot::Feedback,
            tracks_password_strength: true,
            invalid_form_message: "لطفاً تمام فیلدهای لازم را به درستی تکمیل کنید / Please complete all required fields correctly",
            success_message: "ثبت‌نام شما با موفقیت انجام شد! به خانواده Easy Trading خوش آمدید. / Your registration was successful! Welcome to the Easy Trading family.",
            failure_message: "خطایی در ثبت‌نام رخ داد. لطفاً دوباره تلاش کنید / An error occurred during registration. Please try again.",
        }
    }

    pub fn rules(&self) -> RuleTable {
        match self.kind {
            FormKind::Contact => rules::contact_rules(),
            FormKind::Signup => rules::signup_rules(),
        }
    }
}
