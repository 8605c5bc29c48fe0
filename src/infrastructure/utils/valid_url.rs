use once_cell::sync::Lazy;
use regex::Regex;

/// Optional http(s) scheme, a host with at least one dot, then an optional path.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$")
        .expect("URL pattern must compile")
});

pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}
