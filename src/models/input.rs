//! Form input validation shared by the movie and settings models.

use thiserror::Error;

/// A required form field was missing, blank, or too long.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input: {field}")]
pub struct InvalidInput {
    pub field: &'static str,
}

/// Trims `value` and checks that it is non-empty and at most `max_chars` long.
pub fn required(field: &'static str, value: &str, max_chars: usize) -> Result<String, InvalidInput> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_chars {
        return Err(InvalidInput { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("title", "  Up  ", 60).unwrap(), "Up");
    }

    #[test]
    fn test_required_rejects_blank_and_long() {
        assert_eq!(required("title", "", 60), Err(InvalidInput { field: "title" }));
        assert!(required("title", "   ", 60).is_err());
        assert!(required("year", "19999", 4).is_err());
        assert!(required("year", "1999", 4).is_ok());
    }

    #[test]
    fn test_required_counts_chars_not_bytes() {
        assert!(required("name", "千と千尋", 4).is_ok());
    }
}
