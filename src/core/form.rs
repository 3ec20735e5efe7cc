//! Lead form validation and arithmetic captcha
//!
//! Submission is simulated on the page; nothing here performs I/O.

use rand::{Rng, RngCore};
use std::time::Duration;

/// How long the page pretends to send the form
pub const SIMULATED_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Minimum number of digits in a phone number
pub const MIN_PHONE_DIGITS: usize = 7;

/// Operand range of the first captcha shown on page load
pub const INITIAL_CAPTCHA_MAX: u32 = 10;
/// Operand range of the captcha shown after a successful submission
pub const FOLLOWUP_CAPTCHA_MAX: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("enter a valid phone number (digits only)")]
    InvalidPhone,

    #[error("wrong answer to the captcha")]
    WrongCaptcha,

    #[error("accept the privacy policy")]
    PolicyNotAccepted,
}

impl FormError {
    /// Name of the input to highlight
    pub fn field(&self) -> &'static str {
        match self {
            FormError::InvalidPhone => "phone",
            FormError::WrongCaptcha => "captcha",
            FormError::PolicyNotAccepted => "policy",
        }
    }
}

/// "a + b" challenge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Captcha {
    pub a: u32,
    pub b: u32,
}

impl Captcha {
    /// Two operands drawn uniformly from `1..=max`
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R, max: u32) -> Self {
        let max = max.max(1);
        Self {
            a: rng.gen_range(1..=max),
            b: rng.gen_range(1..=max),
        }
    }

    pub fn answer(&self) -> u32 {
        self.a + self.b
    }

    pub fn question(&self) -> String {
        format!("{} + {}", self.a, self.b)
    }

    /// Leading-integer parse of the user's answer, like the page's own
    /// `parseInt` check: optional sign, `0x` selects hex, trailing junk ignored
    pub fn check(&self, input: &str) -> bool {
        parse_leading_int(input).is_some_and(|v| v == i64::from(self.answer()))
    }
}

fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };
    let end = s.find(|c: char| !c.is_digit(radix)).unwrap_or(s.len());
    let value = i64::from_str_radix(&s[..end], radix).ok()?;
    Some(if negative { -value } else { value })
}

/// Raw field values as typed by the user
#[derive(Clone, Debug, Default)]
pub struct LeadForm {
    pub phone: String,
    pub captcha_answer: String,
    pub policy_accepted: bool,
}

/// Drop spaces, dashes, plus signs and parentheses
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '+' | '(' | ')'))
        .collect()
}

/// Validate in page order, stopping at the first failure
pub fn validate_lead(form: &LeadForm, captcha: &Captcha) -> Result<(), FormError> {
    let phone = normalize_phone(&form.phone);
    if phone.len() < MIN_PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormError::InvalidPhone);
    }
    if !captcha.check(&form.captcha_answer) {
        return Err(FormError::WrongCaptcha);
    }
    if !form.policy_accepted {
        return Err(FormError::PolicyNotAccepted);
    }
    Ok(())
}
