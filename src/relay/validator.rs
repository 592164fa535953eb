//! Target URL validation.
//!
//! Validation only guards against malformed input. A URL that parses as an
//! absolute URL with a host is accepted whatever it points at; the `.mp4`
//! suffix is a hint, never a gate.

use url::Url;

/// Parse `raw` into the URL that will be fetched, or `None` if it is not an
/// absolute URL with a host.
pub fn parse_target(raw: &str) -> Option<Url> {
    // The WHATWG parser invents a host for `http:/x` or `http:///x`.
    if !has_authority(raw) {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if url.scheme().is_empty() || !has_host {
        return None;
    }
    Some(url)
}

/// Whether `raw` is acceptable as a relay target.
pub fn validate(raw: &str) -> bool {
    parse_target(raw).is_some()
}

/// `<scheme>://<authority>` with a non-empty authority, as written.
fn has_authority(raw: &str) -> bool {
    let Some((_, rest)) = raw.split_once(':') else {
        return false;
    };
    let Some(rest) = rest.strip_prefix("//") else {
        return false;
    };
    let authority = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    !authority.is_empty()
}

/// Whether the URL's path ends in `.mp4` (case-insensitive).
pub fn has_mp4_extension(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(".mp4")
}
