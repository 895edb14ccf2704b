//! User field rules.

use rand::RngExt;

/// Login medium recorded when a user signs in with email + password.
pub const DEFAULT_LOGIN_MEDIUM: &str = "email";

/// Default IANA time zone for new users.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Length of the random display name used when the email gives nothing usable.
pub const FALLBACK_DISPLAY_NAME_LEN: usize = 6;

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lower-case and trim an email address.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase().trim().to_owned()
}

/// Derive a display name from an email: the part before the first `@`.
///
/// Falls back to a random string of ASCII letters when there is no email
/// or its local part is empty.
pub fn derive_display_name(email: Option<&str>) -> String {
    let local = email
        .and_then(|e| e.split('@').next())
        .filter(|local| !local.is_empty());
    match local {
        Some(local) => local.to_owned(),
        None => random_letters(FALLBACK_DISPLAY_NAME_LEN),
    }
}

fn random_letters(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ASCII_LETTERS[rng.random_range(0..ASCII_LETTERS.len())] as char)
        .collect()
}

/// Whether `name` is a known IANA time zone (e.g. `"Europe/Moscow"`).
pub fn is_valid_timezone(name: &str) -> bool {
    name.parse::<chrono_tz::Tz>().is_ok()
}
