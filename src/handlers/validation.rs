//! Custom validators and query types shared by the handlers.

use crate::models::page::Page;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Rejects strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// `from`/`size` query parameters. `from` is an element offset.
#[derive(Debug, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl PageQuery {
    pub fn page(&self, default_size: i64) -> Page {
        Page::new(self.from.unwrap_or(0), self.size.unwrap_or(default_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_fail() {
        assert!(not_blank("drill").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("  \t").is_err());
    }

    #[test]
    fn page_query_bounds() {
        let ok = PageQuery { from: Some(0), size: Some(1) };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.page(10), Page::new(0, 1));

        let defaults = PageQuery { from: None, size: None };
        assert!(defaults.validate().is_ok());
        assert_eq!(defaults.page(10), Page::new(0, 10));

        assert!(PageQuery { from: Some(-1), size: None }.validate().is_err());
        assert!(PageQuery { from: None, size: Some(0) }.validate().is_err());
    }
}
