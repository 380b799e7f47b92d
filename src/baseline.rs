//! Settings-only URL flattening, used when a request carries no API headers.

use crate::settings::Settings;

/// Strips the configured API and public prefixes from a single URL.
pub fn flatten_to_app_url(settings: &Settings, url: Option<&str>) -> Option<String> {
    url.map(|url| {
        strip_prefixes(
            url,
            [
                settings.internal_api_path.as_deref(),
                settings.api_path.as_deref(),
                settings.public_url.as_deref(),
            ],
        )
    })
}

/// Removes every occurrence of the configured API prefixes from markup.
pub fn flatten_html_to_app_url(settings: &Settings, html: &str) -> String {
    remove_all_prefixes(
        html,
        settings.internal_api_path.as_deref(),
        settings.api_path.as_deref(),
    )
}

/// Removes the first occurrence of each prefix, in order.
pub(crate) fn strip_prefixes<'a, I>(url: &str, prefixes: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    prefixes
        .into_iter()
        .flatten()
        .filter(|prefix| !prefix.is_empty())
        .fold(url.to_string(), |acc, prefix| acc.replacen(prefix, "", 1))
}

/// Global removal of the internal prefix (if any) and then the API prefix.
pub(crate) fn remove_all_prefixes(
    html: &str,
    internal_api_path: Option<&str>,
    api_path: Option<&str>,
) -> String {
    [internal_api_path, api_path]
        .into_iter()
        .flatten()
        .filter(|prefix| !prefix.is_empty())
        .fold(html.to_string(), |acc, prefix| acc.replace(prefix, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::new(
            Some("https://example.com/api"),
            Some("http://backend:8080/Plone"),
            Some("https://example.com"),
        )
    }

    #[test]
    fn test_flatten_strips_internal_prefix() {
        assert_eq!(
            flatten_to_app_url(&settings(), Some("http://backend:8080/Plone/news/item1")),
            Some("/news/item1".to_string())
        );
    }

    #[test]
    fn test_flatten_strips_public_url() {
        assert_eq!(
            flatten_to_app_url(&settings(), Some("https://example.com/about")),
            Some("/about".to_string())
        );
    }

    #[test]
    fn test_flatten_passes_none_through() {
        assert_eq!(flatten_to_app_url(&settings(), None), None);
    }

    #[test]
    fn test_flatten_without_settings_is_identity() {
        assert_eq!(
            flatten_to_app_url(&Settings::default(), Some("https://x/y")),
            Some("https://x/y".to_string())
        );
    }

    #[test]
    fn test_flatten_only_strips_first_occurrence() {
        let settings = Settings::new(Some("/api"), None, None);
        assert_eq!(
            flatten_to_app_url(&settings, Some("/api/a?next=/api/b")),
            Some("/a?next=/api/b".to_string())
        );
    }

    #[test]
    fn test_flatten_html_removes_every_occurrence() {
        let html = r#"<a href="http://backend:8080/Plone/a">a</a><img src="https://example.com/api/b.png">"#;
        assert_eq!(
            flatten_html_to_app_url(&settings(), html),
            r#"<a href="/a">a</a><img src="/b.png">"#
        );
    }

    #[test]
    fn test_flatten_html_without_internal_path() {
        let settings = Settings::new(Some("/api"), None, None);
        assert_eq!(
            flatten_html_to_app_url(&settings, "<a href='/api/a'></a><a href='/api/b'></a>"),
            "<a href='/a'></a><a href='/b'></a>"
        );
    }

    #[test]
    fn test_empty_prefix_is_never_removed() {
        assert_eq!(strip_prefixes("/a", [Some(""), None]), "/a");
        assert_eq!(remove_all_prefixes("<p/>", Some(""), Some("")), "<p/>");
    }
}
