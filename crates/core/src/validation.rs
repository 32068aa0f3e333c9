//! Input rules shared by the auth and threshold endpoints.

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum stored length of a threshold note, in characters.
pub const NOTE_MAX_CHARS: usize = 180;

/// Validate that a password meets the minimum length.
///
/// Returns `Err` with a human-readable explanation when it is too short.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!("Password must be at least {min_length} characters"));
    }
    Ok(())
}

/// Truncate a threshold note to [`NOTE_MAX_CHARS`] characters.
///
/// Counts Unicode scalar values, so multi-byte text is never split mid-character.
pub fn truncate_note(note: &str) -> String {
    match note.char_indices().nth(NOTE_MAX_CHARS) {
        Some((cut, _)) => note[..cut].to_string(),
        None => note.to_string(),
    }
}
