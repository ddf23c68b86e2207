//! Utility macros and functions for the HTTP crate.
//!
//! This module provides helper macros and functions that are used internally
//! by the HTTP crate implementation.

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
///
/// # Example
///
/// ```ignore
/// ensure!(headers.len() < MAX_HEADERS, ParseError::TooManyHeaders);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Checks whether a comma separated header value contains `token` as a whole element.
///
/// Elements are trimmed and compared ASCII case-insensitively, so `x-gzip` does not
/// match `gzip`.
pub(crate) fn has_token(value: &str, token: &str) -> bool {
    value.split(',').any(|item| item.trim().eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_matching() {
        assert!(has_token("gzip", "gzip"));
        assert!(has_token("deflate, gzip", "gzip"));
        assert!(has_token(" Keep-Alive ,Upgrade", "keep-alive"));
        assert!(!has_token("x-gzip", "gzip"));
        assert!(!has_token("gzipped", "gzip"));
        assert!(!has_token("", "close"));
    }
}
