//! Password policy applied at registration.
//!
//! Four checks run on every candidate password and all failures are reported together:
//! minimum length, common-password list, entirely-numeric, and similarity to the user's
//! own attributes.

use std::collections::{HashMap, HashSet};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Similarity ratio at or above which a password is rejected.
pub const MAX_SIMILARITY: f64 = 0.7;

const COMMON_PASSWORDS: &[&str] = &[
    "123456", "password", "12345678", "qwerty", "123456789", "12345", "1234", "111111",
    "1234567", "dragon", "123123", "baseball", "abc123", "football", "monkey", "letmein",
    "696969", "shadow", "master", "666666", "qwertyuiop", "123321", "mustang", "1234567890",
    "michael", "654321", "superman", "1qaz2wsx", "7777777", "121212", "000000", "qazwsx",
    "123qwe", "killer", "trustno1", "jordan", "jennifer", "zxcvbnm", "asdfgh", "hunter",
    "buster", "soccer", "harley", "batman", "andrew", "tigger", "sunshine", "iloveyou",
    "2000", "charlie", "robert", "thomas", "hockey", "ranger", "daniel", "starwars",
    "klaster", "112233", "george", "computer", "michelle", "jessica", "pepper", "1111",
    "zxcvbn", "555555", "11111111", "131313", "freedom", "777777", "pass", "maggie",
    "159753", "aaaaaa", "ginger", "princess", "joshua", "cheese", "amanda", "summer",
    "love", "ashley", "nicole", "chelsea", "biteme", "matthew", "access", "yankees",
    "987654321", "dallas", "austin", "thunder", "taylor", "matrix", "password1",
    "passw0rd", "welcome", "admin", "administrator", "qwerty123", "iloveyou1",
];

/// A single policy violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordIssue {
    #[error("password must contain at least {0} characters")]
    TooShort(usize),
    #[error("password is too common")]
    TooCommon,
    #[error("password is entirely numeric")]
    EntirelyNumeric,
    #[error("password is too similar to the {0}")]
    TooSimilar(&'static str),
}

/// User attributes a password must not resemble. Empty strings are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAttributes<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

impl<'a> UserAttributes<'a> {
    fn named(&self) -> [(&'static str, &'a str); 4] {
        [
            ("username", self.username),
            ("first name", self.first_name),
            ("last name", self.last_name),
            ("email", self.email),
        ]
    }
}

/// The password checks. The embedded common-password list can be extended at startup
/// with a larger newline-separated list.
#[derive(Debug, Clone, Default)]
pub struct PasswordPolicy {
    extra_common: HashSet<String>,
}

impl PasswordPolicy {
    /// Add every non-blank line of `list` to the common passwords, trimmed and lower-cased.
    pub fn with_common_list(mut self, list: &str) -> Self {
        self.extra_common.extend(
            list.lines()
                .map(|line| line.trim().to_lowercase())
                .filter(|line| !line.is_empty()),
        );
        self
    }

    /// Number of passwords loaded on top of the embedded list.
    pub fn extra_common_len(&self) -> usize {
        self.extra_common.len()
    }

    fn is_common(&self, lowered: &str) -> bool {
        COMMON_PASSWORDS.contains(&lowered) || self.extra_common.contains(lowered)
    }

    /// Run every check and collect all failures.
    pub fn validate(
        &self,
        password: &str,
        attributes: &UserAttributes<'_>,
    ) -> Result<(), Vec<PasswordIssue>> {
        let mut issues = Vec::new();

        if let Some(attr) = similar_attribute(password, attributes) {
            issues.push(PasswordIssue::TooSimilar(attr));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            issues.push(PasswordIssue::TooShort(MIN_PASSWORD_LEN));
        }
        if self.is_common(&password.trim().to_lowercase()) {
            issues.push(PasswordIssue::TooCommon);
        }
        if !password.is_empty() && password.chars().all(|c| c.is_numeric()) {
            issues.push(PasswordIssue::EntirelyNumeric);
        }

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }
}

/// [`PasswordPolicy::validate`] with only the embedded common-password list.
pub fn validate_password(
    password: &str,
    attributes: &UserAttributes<'_>,
) -> Result<(), Vec<PasswordIssue>> {
    PasswordPolicy::default().validate(password, attributes)
}

fn similar_attribute(password: &str, attributes: &UserAttributes<'_>) -> Option<&'static str> {
    let password = password.to_lowercase();
    for (name, value) in attributes.named() {
        if value.is_empty() {
            continue;
        }
        let value = value.to_lowercase();
        let parts = value
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .chain(std::iter::once(value.as_str()));
        for part in parts {
            if exceeds_length_ratio(&password, part) {
                continue;
            }
            if quick_ratio(&password, part) >= MAX_SIMILARITY {
                return Some(name);
            }
        }
    }
    None
}

/// A much longer password cannot meaningfully resemble a short attribute part.
fn exceeds_length_ratio(password: &str, part: &str) -> bool {
    let pwd_len = password.chars().count();
    let part_len = part.chars().count();
    let bound = MAX_SIMILARITY / 2.0 * pwd_len as f64;
    pwd_len >= 10 * part_len && (part_len as f64) < bound
}

/// Upper bound on the matching-blocks ratio: shared characters regardless of order.
fn quick_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
    }
    let mut matches = 0usize;
    for c in a.chars() {
        if let Some(n) = available.get_mut(&c) {
            if *n > 0 {
                *n -= 1;
                matches += 1;
            }
        }
    }
    2.0 * matches as f64 / total as f64
}
