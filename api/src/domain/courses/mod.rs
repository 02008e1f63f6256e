pub mod content;
pub mod course;
pub mod module;
pub mod subject;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::ordering::ORDER_MAX;

pub const TITLE_MAX_LEN: usize = 200;
pub const ITEM_TITLE_MAX_LEN: usize = 250;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid regex"));

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{field}` must not be empty")]
    Empty { field: &'static str },
    #[error("`{field}` must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("`{field}` may only contain letters, numbers, underscores or hyphens")]
    InvalidSlug { field: &'static str },
    #[error("`{field}` is required for {kind} items")]
    MissingPayload { field: &'static str, kind: &'static str },
    #[error("`{field}` references a record that does not exist")]
    UnknownReference { field: &'static str },
    #[error("content kind cannot change from {from} to {to}")]
    KindChange { from: &'static str, to: &'static str },
    #[error("`{field}` must be between 0 and {max}")]
    OrderOutOfRange { field: &'static str, max: i32 },
    #[error("`{field}` must be an http or https URL")]
    InvalidUrl { field: &'static str },
}

pub fn validate_title(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn validate_slug(field: &'static str, value: &str) -> Result<(), ValidationError> {
    validate_title(field, value, TITLE_MAX_LEN)?;
    if !SLUG_RE.is_match(value) {
        return Err(ValidationError::InvalidSlug { field });
    }
    Ok(())
}

/// Explicit orders; the database only stores non-negative values.
pub fn validate_order(field: &'static str, value: Option<i32>) -> Result<(), ValidationError> {
    match value {
        Some(order) if !(0..=ORDER_MAX).contains(&order) => Err(ValidationError::OrderOutOfRange {
            field,
            max: ORDER_MAX,
        }),
        _ => Ok(()),
    }
}

/// Only absolute http(s) links may end up in an `href` or `src`.
pub fn validate_web_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let lower = value.trim().to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ValidationError::InvalidUrl { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_slugs() {
        assert!(validate_slug("slug", "django-101_intro").is_ok());
    }

    #[test]
    fn rejects_spaces_and_punctuation_in_slugs() {
        assert_eq!(
            validate_slug("slug", "intro to rust"),
            Err(ValidationError::InvalidSlug { field: "slug" })
        );
        assert!(validate_slug("slug", "a/b").is_err());
    }

    #[test]
    fn title_length_counts_chars() {
        let ok = "é".repeat(TITLE_MAX_LEN);
        assert!(validate_title("title", &ok, TITLE_MAX_LEN).is_ok());
        let long = "x".repeat(TITLE_MAX_LEN + 1);
        assert_eq!(
            validate_title("title", &long, TITLE_MAX_LEN),
            Err(ValidationError::TooLong {
                field: "title",
                max: TITLE_MAX_LEN
            })
        );
        assert_eq!(
            validate_title("title", "   ", TITLE_MAX_LEN),
            Err(ValidationError::Empty { field: "title" })
        );
    }

    #[test]
    fn orders_must_be_within_range() {
        assert!(validate_order("order", None).is_ok());
        assert!(validate_order("order", Some(0)).is_ok());
        assert!(validate_order("order", Some(ORDER_MAX)).is_ok());
        for bad in [-3, i32::MIN, ORDER_MAX + 1, i32::MAX] {
            assert_eq!(
                validate_order("order", Some(bad)),
                Err(ValidationError::OrderOutOfRange {
                    field: "order",
                    max: ORDER_MAX
                }),
                "{bad}"
            );
        }
    }

    #[test]
    fn only_web_urls_pass() {
        for ok in ["https://youtu.be/dQw4w9WgXcQ", "HTTP://example.com/v.mp4"] {
            assert!(validate_web_url("url", ok).is_ok(), "{ok}");
        }
        for bad in [
            "javascript:alert(document.cookie)",
            " JavaScript:alert(1)",
            "data:text/html,<script>",
            "//evil.example/x",
            "https://",
            "https:///path",
            "ftp-ish",
        ] {
            assert_eq!(
                validate_web_url("url", bad),
                Err(ValidationError::InvalidUrl { field: "url" }),
                "{bad}"
            );
        }
    }
}
