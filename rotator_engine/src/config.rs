/// Rotator v1 — Configuration Parsing
///
/// Attribute values arrive as opaque strings from the hero container.
/// Malformed input is never an error: it is silently normalized to a
/// safe default. The rotator is decorative; nothing here may fail.

/// Guaranteed-present fallback image. Always element 0 of the effective
/// image list, so the hero is never blank.
pub const FALLBACK_IMAGE: &str = "assets/img/hero/hero-1.svg";

/// Default rotation period when the interval attribute is absent or
/// unparseable.
pub const DEFAULT_INTERVAL_MS: u64 = 7000;

/// Fixed semi-transparent tint composed over every painted image.
pub const TINT: &str =
    "linear-gradient(180deg, rgba(13,59,102,.20), rgba(13,59,102,.60))";

/// Split a delimited image-URL attribute into its entries.
///
/// Delimiters: comma, semicolon, newline (mixed freely). Entries are
/// trimmed; empty entries are dropped. Does NOT prepend the fallback.
pub fn parse_image_list(raw: &str) -> Vec<String> {
    raw.split(|c| c == ',' || c == ';' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the effective image list: `[FALLBACK, ...parsed]` when parsing
/// yields anything, `[FALLBACK]` otherwise.
pub fn effective_image_list(raw: &str) -> Vec<String> {
    let mut images = vec![FALLBACK_IMAGE.to_string()];
    images.extend(parse_image_list(raw));
    images
}

/// Parse the interval attribute. Anything that is not a positive
/// integer (absent, empty, non-numeric, zero) falls back to
/// `DEFAULT_INTERVAL_MS`.
pub fn parse_interval_ms(raw: Option<&str>) -> u64 {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => DEFAULT_INTERVAL_MS,
        },
        _ => DEFAULT_INTERVAL_MS,
    }
}

/// Compose the CSS background value a paint backend sets on a layer:
/// tint first, image underneath.
pub fn composite_background(url: &str) -> String {
    format!("{}, url(\"{}\")", TINT, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_delimiters() {
        assert_eq!(
            parse_image_list("a.jpg, b.jpg;c.jpg"),
            vec!["a.jpg", "b.jpg", "c.jpg"]
        );
    }

    #[test]
    fn test_parse_drops_empty_entries() {
        assert_eq!(parse_image_list(" , ;\n x.png ,"), vec!["x.png"]);
        assert!(parse_image_list("").is_empty());
        assert!(parse_image_list("  ;;  \n ,").is_empty());
    }

    #[test]
    fn test_effective_list_prepends_fallback() {
        assert_eq!(
            effective_image_list("a.jpg, b.jpg;c.jpg"),
            vec![FALLBACK_IMAGE, "a.jpg", "b.jpg", "c.jpg"]
        );
    }

    #[test]
    fn test_effective_list_empty_input_is_fallback_only() {
        assert_eq!(effective_image_list(""), vec![FALLBACK_IMAGE]);
        assert_eq!(effective_image_list("  ; ,"), vec![FALLBACK_IMAGE]);
    }

    #[test]
    fn test_interval_valid() {
        assert_eq!(parse_interval_ms(Some("3000")), 3000);
        assert_eq!(parse_interval_ms(Some("  500 ")), 500);
    }

    #[test]
    fn test_interval_falls_back() {
        assert_eq!(parse_interval_ms(None), DEFAULT_INTERVAL_MS);
        assert_eq!(parse_interval_ms(Some("")), DEFAULT_INTERVAL_MS);
        assert_eq!(parse_interval_ms(Some("fast")), DEFAULT_INTERVAL_MS);
        assert_eq!(parse_interval_ms(Some("0")), DEFAULT_INTERVAL_MS);
        assert_eq!(parse_interval_ms(Some("-200")), DEFAULT_INTERVAL_MS);
        assert_eq!(parse_interval_ms(Some("3.5")), DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn test_composite_background_layers_tint_over_url() {
        let css = composite_background("a.jpg");
        assert!(css.starts_with(TINT));
        assert!(css.ends_with("url(\"a.jpg\")"));
    }
}
