//! Advisory password strength meter for the signup form. It never gates
//! submission.

const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";
const MIN_STRONG_LENGTH: usize = 8;

const LABELS: [&str; 6] = ["", "very weak", "weak", "medium", "strong", "very strong"];
const COLORS: [&str; 6] = ["", "#ff6b6b", "#ffa500", "#ffd700", "#32cd32", "#00ff7f"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrengthChecks {
    pub length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl StrengthChecks {
    pub fn of(password: &str) -> Self {
        Self {
            length: password.encode_utf16().count() >= MIN_STRONG_LENGTH,
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    fn passed(&self) -> u8 {
        [self.length, self.lowercase, self.uppercase, self.digit, self.special]
            .into_iter()
            .filter(|passed| *passed)
            .count() as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordStrength {
    score: u8,
}

impl PasswordStrength {
    /// Scores the raw, untrimmed password. An empty password scores 0.
    pub fn evaluate(password: &str) -> Self {
        Self {
            score: StrengthChecks::of(password).passed(),
        }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Width of the meter fill, in percent.
    pub fn percent(&self) -> u8 {
        self.score() * 20
    }

    pub fn label(&self) -> &'static str {
        LABELS[self.score() as usize]
    }

    pub fn color(&self) -> &'static str {
        COLORS[self.score() as usize]
    }
}
