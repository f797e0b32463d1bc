//! Share-link encoding for the `data` query parameter.
//!
//! A share link carries the full serialized analysis, percent-encoded, so a
//! report can be opened with no server-side state at all.

use std::str::Utf8Error;

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

/// Builds the query-string value for a share link from serialized JSON.
pub fn encode_share_param(json: &str) -> String {
    utf8_percent_encode(json, NON_ALPHANUMERIC).to_string()
}

/// Decodes a percent-encoded share payload back to JSON text.
///
/// Stray or malformed percent sequences pass through literally; the only
/// decode failure is bytes that are not valid UTF-8. Whether the text is
/// usable JSON is the caller's problem.
pub fn decode_share_param(raw: &str) -> Result<String, Utf8Error> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
}

/// Pulls the still-encoded `data` value out of a raw query string.
///
/// Axum's typed `Query` extractor percent-decodes values once, which would
/// corrupt a payload that must be decoded by the resolver itself, so the
/// parameter is extracted from the raw query instead.
pub fn share_param_from_query(query: &str) -> Option<&str> {
    query.split('&').find_map(|pair| pair.strip_prefix("data="))
}
