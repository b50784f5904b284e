//! Declarative rule tables for the contact and signup forms.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Persian letters and whitespace only.
    static ref PERSIAN_NAME_PATTERN: Regex = Regex::new(r"^[\x{0600}-\x{06FF}\s]+$").unwrap();
    static ref USERNAME_PATTERN: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
    // Iranian mobile numbers: 9XXXXXXXXX with an optional +98 or 0 prefix.
    static ref PHONE_PATTERN: Regex = Regex::new(r"^(\+98|0)?9[0-9]{9}$").unwrap();
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const REQUIRED_MESSAGE: &str = "این فیلد الزامی است / This field is required";

pub const SIGNUP_FULL_NAME_MESSAGE: &str =
    "نام کامل باید حداقل ۲ حرف باشد و فقط شامل حروف فارسی باشد / Full name must be at least 2 characters and contain only Persian letters";
pub const USERNAME_MESSAGE: &str =
    "نام کاربری باید ۳-۲۰ کاراکتر و فقط شامل حروف انگلیسی، اعداد و زیرخط باشد / Username must be 3-20 characters of English letters, digits and underscores";
pub const PHONE_MESSAGE: &str =
    "شماره تماس باید معتبر باشد (مثال: 09123456789) / Phone number must be valid (example: 09123456789)";
pub const EMAIL_MESSAGE: &str = "لطفاً یک ایمیل معتبر وارد کنید / Please enter a valid email address";
pub const PASSWORD_MESSAGE: &str = "رمز عبور باید حداقل ۸ کاراکتر باشد / Password must be at least 8 characters";
pub const CONFIRM_PASSWORD_MESSAGE: &str =
    "رمز عبور و تأیید آن باید یکسان باشند / Password and confirmation must match";
pub const COUNTRY_MESSAGE: &str = "لطفاً کشور خود را انتخاب کنید / Please select your country";
pub const TERMS_MESSAGE: &str =
    "برای ثبت‌نام باید شرایط و قوانین را بپذیرید / You must accept the terms and conditions to sign up";

pub const CONTACT_FULL_NAME_MESSAGE: &str =
    "نام کامل باید حداقل ۲ حرف باشد / Full name must be at least 2 characters";
pub const SUBJECT_MESSAGE: &str = "لطفاً یک موضوع انتخاب کنید / Please select a subject";
pub const CONTACT_MESSAGE_MESSAGE: &str =
    "پیام باید حداقل ۱۰ حرف باشد / Message must be at least 10 characters";

/// How a field is entered on the page. Checkboxes get the acceptance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    Choice,
    Checkbox,
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static Regex>,
    pub match_field: Option<&'static str>,
    pub input: FieldInput,
    pub message: &'static str,
    /// Shown for an empty required value; falls back to [`REQUIRED_MESSAGE`].
    pub required_message: Option<&'static str>,
}

impl FieldRule {
    pub const fn required(message: &'static str) -> Self {
        Self {
            required: true,
            min_length: None,
            max_length: None,
            pattern: None,
            match_field: None,
            input: FieldInput::Text,
            message,
            required_message: None,
        }
    }

    pub const fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn pattern(mut self, pattern: &'static Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub const fn matches(mut self, field: &'static str) -> Self {
        self.match_field = Some(field);
        self
    }

    pub const fn input(mut self, input: FieldInput) -> Self {
        self.input = input;
        self
    }

    /// Use the field's own message for empty values too.
    pub const fn own_required_message(mut self) -> Self {
        self.required_message = Some(self.message);
        self
    }

    pub fn empty_message(&self) -> &'static str {
        self.required_message.unwrap_or(REQUIRED_MESSAGE)
    }
}

/// Ordered field name → rule mapping. Order is the order fields are
/// validated and rendered in.
pub type RuleTable = Vec<(&'static str, FieldRule)>;

pub fn signup_rules() -> RuleTable {
    vec![
        (
            "fullName",
            FieldRule::required(SIGNUP_FULL_NAME_MESSAGE)
                .min_length(2)
                .pattern(&PERSIAN_NAME_PATTERN),
        ),
        (
            "username",
            FieldRule::required(USERNAME_MESSAGE)
                .min_length(3)
                .max_length(20)
                .pattern(&USERNAME_PATTERN),
        ),
        ("phoneNumber", FieldRule::required(PHONE_MESSAGE).pattern(&PHONE_PATTERN)),
        ("email", FieldRule::required(EMAIL_MESSAGE).pattern(&EMAIL_PATTERN)),
        ("password", FieldRule::required(PASSWORD_MESSAGE).min_length(8)),
        (
            "confirmPassword",
            FieldRule::required(CONFIRM_PASSWORD_MESSAGE).matches("password"),
        ),
        ("country", FieldRule::required(COUNTRY_MESSAGE).input(FieldInput::Choice)),
        ("termsAccepted", FieldRule::required(TERMS_MESSAGE).input(FieldInput::Checkbox)),
    ]
}

pub fn contact_rules() -> RuleTable {
    vec![
        (
            "fullName",
            FieldRule::required(CONTACT_FULL_NAME_MESSAGE)
                .min_length(2)
                .own_required_message(),
        ),
        (
            "email",
            FieldRule::required(EMAIL_MESSAGE)
                .pattern(&EMAIL_PATTERN)
                .own_required_message(),
        ),
        (
            "subject",
            FieldRule::required(SUBJECT_MESSAGE)
                .input(FieldInput::Choice)
                .own_required_message(),
        ),
        (
            "message",
            FieldRule::required(CONTACT_MESSAGE_MESSAGE)
                .min_length(10)
                .own_required_message(),
        ),
    ]
}
