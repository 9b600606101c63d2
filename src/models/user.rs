use super::input::{InvalidInput, required};

pub const MAX_NAME_CHARS: usize = 20;

/// User data without the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Validates a display name submitted through the settings form.
pub fn parse_display_name(name: &str) -> Result<String, InvalidInput> {
    required("name", name, MAX_NAME_CHARS)
}
