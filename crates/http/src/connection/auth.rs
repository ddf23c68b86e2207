//! HTTP Basic authentication.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::config::Credentials;

/// Checks an `Authorization` header value against `credentials`.
///
/// Accepts only `Basic <base64(username:password)>` with the scheme spelled exactly
/// `Basic`. The decoded pair is split at the first `:`.
pub(crate) fn check_basic(credentials: &Credentials, authorization: Option<&[u8]>) -> bool {
    let Some(value) = authorization else {
        return false;
    };

    let (scheme, payload) = split_at_first(value.trim_ascii(), b' ');
    if scheme != b"Basic" {
        return false;
    }

    let Ok(userpass) = STANDARD.decode(payload.trim_ascii()) else {
        return false;
    };

    let (username, password) = split_at_first(&userpass, b':');
    // plain comparison: the time taken leaks how much of the secret matched
    username == credentials.username().as_bytes() && password == credentials.password().as_bytes()
}

fn split_at_first(bytes: &[u8], separator: u8) -> (&[u8], &[u8]) {
    match bytes.iter().position(|b| *b == separator) {
        Some(index) => (&bytes[..index], &bytes[index + 1..]),
        None => (bytes, &[]),
    }
}
