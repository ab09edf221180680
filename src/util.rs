use std::collections::HashMap;

use crate::types::{Error, Result};

/// Compiles a regex from a literal once and reuses it afterwards.
macro_rules! static_regex {
    ($re:literal) => {{
        static RE: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
        RE.get_or_init(|| ::regex::Regex::new($re).expect("static regex must compile"))
    }};
}

/// Compiles a CSS selector from a literal once and reuses it afterwards.
macro_rules! static_selector {
    ($sel:literal) => {{
        static SEL: ::std::sync::OnceLock<::scraper::Selector> = ::std::sync::OnceLock::new();
        SEL.get_or_init(|| ::scraper::Selector::parse($sel).expect("static selector must parse"))
    }};
}

pub(crate) use static_regex;
pub(crate) use static_selector;

/// Extracts an email address from arbitrary link text, tolerating `mailto:`
/// and `javascript:` wrappers. Returns `None` when nothing address-shaped
/// is present.
///
/// # Parameters
/// - `text`: The href or text to search.
///
/// # Returns
/// The extracted address, if any.
pub fn extract_email(text: &str) -> Option<String> {
    static_regex!(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .find(text)
        .map(|m| m.as_str().to_string())
}

/// Normalizes a district portal URL to `host[/path]` form: the scheme is
/// dropped, and any trailing slash is trimmed. Districts publish their
/// portal addresses inconsistently, so all of these are accepted:
/// `https://portal.example.org`, `portal.example.org/`,
/// `https://portal.example.org/pxp`.
///
/// # Parameters
/// - `input`: The district URL or bare host.
///
/// # Returns
/// The normalized `host[/path]` string.
pub fn normalize_district_host(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "district_url",
            "a district portal URL is required",
        ));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = url::Url::parse(&with_scheme)?;
    let host = url
        .host_str()
        .ok_or(Error::InvalidInput("district_url", "no host in URL"))?;

    let path = url.path().trim_end_matches('/');
    Ok(format!("{host}{path}"))
}

/// Parses the query pairs out of an href, with or without a leading path.
/// Duplicate keys keep the first value.
pub fn query_pairs(href: &str) -> HashMap<String, String> {
    let query = href.split_once('?').map(|(_, q)| q).unwrap_or(href);
    let mut map = HashMap::new();
    for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
        map.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_from_mailto() {
        assert_eq!(
            Some("lmonroe@springfield.k12.ca.us".to_string()),
            extract_email("mailto:lmonroe@springfield.k12.ca.us")
        );
    }

    #[test]
    fn email_from_javascript_wrapper() {
        assert_eq!(
            Some("lmonroe@springfield.k12.ca.us".to_string()),
            extract_email("javascript:mailto('lmonroe@springfield.k12.ca.us')")
        );
    }

    #[test]
    fn email_absent() {
        assert_eq!(None, extract_email("javascript:void(0)"));
    }

    #[test]
    fn district_host_plain() {
        assert_eq!(
            "portal.sfusd.edu",
            normalize_district_host("portal.sfusd.edu").unwrap()
        );
    }

    #[test]
    fn district_host_with_scheme_and_slash() {
        assert_eq!(
            "portal.sfusd.edu",
            normalize_district_host("https://portal.sfusd.edu/").unwrap()
        );
    }

    #[test]
    fn district_host_with_path() {
        assert_eq!(
            "portal.example.org/pxp",
            normalize_district_host("https://portal.example.org/pxp/").unwrap()
        );
    }

    #[test]
    fn query_pairs_with_path() {
        let qs = query_pairs("PXP2_Gradebook.aspx?AGU=0&DGU=5501&GP=abc");
        assert_eq!("5501", qs["DGU"]);
        assert_eq!("abc", qs["GP"]);
    }
}
