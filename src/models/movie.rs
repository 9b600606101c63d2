use super::input::{InvalidInput, required};

pub const MAX_TITLE_CHARS: usize = 60;
pub const MAX_YEAR_CHARS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: String,
}

/// Title and year that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieInput {
    pub title: String,
    pub year: String,
}

impl MovieInput {
    pub fn parse(title: &str, year: &str) -> Result<Self, InvalidInput> {
        Ok(Self {
            title: required("title", title, MAX_TITLE_CHARS)?,
            year: required("year", year, MAX_YEAR_CHARS)?,
        })
    }
}
