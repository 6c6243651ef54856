use crate::ConfigError;
use url::Url;

/// Normalizes a URL into its visited-set key
///
/// The key is the URL with a trailing `/` appended when it does not already
/// end with one. No other rewriting happens, so `http://a.test` and
/// `http://a.test/` share a key while `http://A.test/` does not.
///
/// # Examples
///
/// ```
/// use hop_crawler::url::normalize_visit_key;
///
/// assert_eq!(normalize_visit_key("http://a.test"), "http://a.test/");
/// assert_eq!(normalize_visit_key("http://a.test/"), "http://a.test/");
/// ```
pub fn normalize_visit_key(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// Returns true if a link or `Location` value is absolute in the crawler's sense
///
/// Anything starting with `http` qualifies (which covers `https`). Relative
/// references such as `/path` or `../up` do not.
pub fn is_absolute_http(candidate: &str) -> bool {
    candidate.starts_with("http")
}

/// Validates the start URL and gives it a trailing slash
///
/// # Arguments
///
/// * `raw` - The start URL exactly as given on the command line
///
/// # Returns
///
/// * `Ok(String)` - The seed to place on the frontier
/// * `Err(ConfigError)` - The URL does not parse or is not HTTP(S)
pub fn prepare_seed(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", raw, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Start URL '{}' must use http or https, got {}",
            raw,
            parsed.scheme()
        )));
    }

    Ok(normalize_visit_key(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_key_appends_slash() {
        assert_eq!(normalize_visit_key("http://b.test"), "http://b.test/");
        assert_eq!(
            normalize_visit_key("http://b.test/page.html"),
            "http://b.test/page.html/"
        );
    }

    #[test]
    fn test_visit_key_keeps_existing_slash() {
        assert_eq!(normalize_visit_key("http://b.test/docs/"), "http://b.test/docs/");
    }

    #[test]
    fn test_visit_key_does_not_touch_case_or_query() {
        assert_eq!(
            normalize_visit_key("http://B.test/?q=1"),
            "http://B.test/?q=1/"
        );
    }

    #[test]
    fn test_is_absolute_http() {
        assert!(is_absolute_http("http://a.test/"));
        assert!(is_absolute_http("https://a.test/"));
        assert!(!is_absolute_http("/relative"));
        assert!(!is_absolute_http("../up"));
        assert!(!is_absolute_http("ftp://a.test/"));
        assert!(!is_absolute_http(""));
    }

    #[test]
    fn test_prepare_seed() {
        assert_eq!(prepare_seed("http://a.test").unwrap(), "http://a.test/");
        assert_eq!(prepare_seed("https://a.test/x/").unwrap(), "https://a.test/x/");
    }

    #[test]
    fn test_prepare_seed_rejects_bad_urls() {
        assert!(matches!(
            prepare_seed("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            prepare_seed("ftp://a.test/"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
