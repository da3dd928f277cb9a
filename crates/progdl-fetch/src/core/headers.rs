/// Response headers as `(name, value)` pairs in the order they arrived.
pub type Headers = Vec<(String, String)>;

const CONTENT_LENGTH: &str = "content-length";

/// Extracts the announced body size from response headers.
///
/// The first header whose name contains `content-length`, ignoring ASCII
/// case, wins. Its value is trimmed and parsed as an unsigned integer.
/// Returns 0 when no name matches or the value does not parse.
///
/// # Examples
///
/// ```
/// use progdl_fetch::content_length;
///
/// let headers = vec![("CONTENT-LENGTH".to_string(), "500".to_string())];
/// assert_eq!(content_length(&headers), 500);
/// assert_eq!(content_length(&[]), 0);
/// ```
pub fn content_length(headers: &[(String, String)]) -> u64 {
    headers
        .iter()
        .find(|(name, _)| name.to_ascii_lowercase().contains(CONTENT_LENGTH))
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}
