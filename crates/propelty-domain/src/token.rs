//! Opaque token generation.

use uuid::Uuid;

/// Length of a generated user token in characters.
pub const TOKEN_LEN: usize = 64;

/// Generate an opaque token: two random UUIDs rendered as hex, back to back.
pub fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
