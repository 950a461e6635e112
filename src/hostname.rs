/// Hostname validation and canonicalization for block-list entries
use url::Url;

/// Prefix `https://` unless the input already carries an http(s) scheme
fn with_scheme(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Check whether user input names a blockable website
///
/// Algorithm:
/// 1. Prepend `https://` if the input has no http(s) scheme
/// 2. Parse as a URL (failure → invalid)
/// 3. Scheme must be `http` or `https`
/// 4. Hostname must contain at least one `.` (rejects `localhost` and friends)
///
/// Examples:
/// - `example.com` → true
/// - `https://example.com` → true
/// - `localhost` → false
/// - `ftp://example.com` → false
pub fn is_valid(input: &str) -> bool {
    let Ok(parsed) = Url::parse(&with_scheme(input)) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    parsed.host_str().is_some_and(|host| host.contains('.'))
}

/// Canonical hostname for a block-list entry
///
/// The entry is parsed as `https://<site>` and the hostname component is kept,
/// which lowercases it and drops any path, query, port or credentials.
pub fn site_hostname(site: &str) -> Option<String> {
    let parsed = Url::parse(&with_scheme(site.trim())).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(|host| host.to_string())
}
