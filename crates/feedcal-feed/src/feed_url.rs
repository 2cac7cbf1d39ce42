//! Feed URL normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FeedError, FeedResult};

static WEBCAL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^webcal://").expect("webcal regex should be valid"));

/// Rewrites a `webcal://` URL (any letter case) to `https://`.
///
/// Everything else is returned unchanged; no other validation is done.
pub fn normalize_feed_url(input: &str) -> String {
    WEBCAL_SCHEME.replace(input, "https://").into_owned()
}

/// Rejects a blank feed URL, then normalizes it.
pub fn validate_feed_url(input: &str) -> FeedResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FeedError::invalid_input("feed URL is required"));
    }
    Ok(normalize_feed_url(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedErrorCode;

    #[test]
    fn rewrites_webcal_in_any_case() {
        for input in [
            "webcal://example.com/cal.ics",
            "WEBCAL://example.com/cal.ics",
            "WebCal://example.com/cal.ics",
        ] {
            assert_eq!(normalize_feed_url(input), "https://example.com/cal.ics");
        }
    }

    #[test]
    fn other_inputs_are_untouched() {
        for input in [
            "https://example.com/cal.ics",
            "http://example.com/webcal://x",
            "example.com/cal.ics",
            " webcal://leading-space",
            "",
        ] {
            assert_eq!(normalize_feed_url(input), input);
        }
    }

    #[test]
    fn only_the_prefix_is_rewritten() {
        assert_eq!(
            normalize_feed_url("webcal://host/?next=webcal://other"),
            "https://host/?next=webcal://other"
        );
    }

    #[test]
    fn blank_url_is_invalid_input() {
        let err = validate_feed_url("   ").unwrap_err();
        assert_eq!(err.code(), FeedErrorCode::InvalidInput);
    }

    #[test]
    fn validate_trims_and_normalizes() {
        assert_eq!(
            validate_feed_url("  webcal://example.com/cal.ics\n").unwrap(),
            "https://example.com/cal.ics"
        );
    }
}
