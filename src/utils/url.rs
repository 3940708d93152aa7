// src/utils/url.rs

//! URL manipulation utilities.

/// Remove tracking query parameters from a URL.
///
/// The input is returned untouched when it does not parse or carries none of
/// the given parameters, so identifiers stay byte-stable across runs.
///
/// # Examples
/// ```
/// use broadcast::utils::url::strip_tracking_params;
///
/// assert_eq!(
///     strip_tracking_params("https://example.com/post?utm_source=feed", &["utm_source"]),
///     "https://example.com/post"
/// );
/// ```
pub fn strip_tracking_params<S: AsRef<str>>(raw: &str, params: &[S]) -> String {
    let Ok(mut parsed) = url::Url::parse(raw) else {
        return raw.to_string();
    };
    let Some(query) = parsed.query() else {
        return raw.to_string();
    };

    // Surviving segments keep their original encoding
    let segments: Vec<&str> = query.split('&').collect();
    let kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| !is_tracking_segment(segment, params))
        .collect();

    if kept.len() == segments.len() {
        return raw.to_string();
    }

    let kept = kept.join("&");
    parsed.set_query((!kept.is_empty()).then_some(kept.as_str()));
    parsed.to_string()
}

/// Whether a raw `key=value` query segment names a tracking parameter.
fn is_tracking_segment<S: AsRef<str>>(segment: &str, params: &[S]) -> bool {
    let raw_key = segment.split('=').next().unwrap_or(segment);
    let key: String = url::form_urlencoded::parse(raw_key.as_bytes())
        .map(|(k, _)| k.into_owned())
        .next()
        .unwrap_or_default();
    params.iter().any(|p| p.as_ref() == key)
}

/// Build an absolute media URL from an origin and a path.
///
/// # Examples
/// ```
/// use broadcast::utils::url::media_url;
///
/// assert_eq!(
///     media_url("https://callofduty.com", "/content/a.jpg"),
///     "https://callofduty.com/content/a.jpg"
/// );
/// ```
pub fn media_url(origin: &str, path: &str) -> String {
    // Already absolute
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACKING: [&str; 3] = ["utm_source", "utm_medium", "utm_campaign"];

    #[test]
    fn test_strip_keeps_other_params() {
        assert_eq!(
            strip_tracking_params(
                "https://example.com/blog/post?utm_source=feed&page=2&utm_medium=app",
                &TRACKING
            ),
            "https://example.com/blog/post?page=2"
        );
    }

    #[test]
    fn test_strip_preserves_encoding_of_kept_params() {
        let tagged = "https://www.callofduty.com/blog/p?utm_source=feed&q=a%20b&tag=x+y";
        let plain = "https://www.callofduty.com/blog/p?q=a%20b&tag=x+y";

        assert_eq!(strip_tracking_params(tagged, &TRACKING), plain);
        assert_eq!(strip_tracking_params(plain, &TRACKING), plain);
    }

    #[test]
    fn test_strip_matches_encoded_keys_and_keeps_fragment() {
        assert_eq!(
            strip_tracking_params("https://example.com/p?utm%5Fmedium=app&id=3#top", &TRACKING),
            "https://example.com/p?id=3#top"
        );
    }

    #[test]
    fn test_strip_without_tracking_is_identity() {
        let raw = "https://www.callofduty.com/blog/2024/10/mw3-season-6";
        assert_eq!(strip_tracking_params(raw, &TRACKING), raw);

        let with_query = "https://example.com/post?id=7";
        assert_eq!(strip_tracking_params(with_query, &TRACKING), with_query);
    }

    #[test]
    fn test_strip_unparseable_is_identity() {
        assert_eq!(
            strip_tracking_params("/relative?utm_source=x", &TRACKING),
            "/relative?utm_source=x"
        );
    }

    #[test]
    fn test_strip_accepts_owned_params() {
        let params = vec!["ref".to_string()];
        assert_eq!(
            strip_tracking_params("https://example.com/a?ref=home", &params),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_media_url() {
        assert_eq!(
            media_url("https://callofduty.com/", "/img/a.png"),
            "https://callofduty.com/img/a.png"
        );
        assert_eq!(
            media_url("https://callofduty.com", "img/a.png"),
            "https://callofduty.com/img/a.png"
        );
        assert_eq!(
            media_url("https://callofduty.com", "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }
}
