//! URL resolution utilities.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Used to resolve `Location` redirect targets against the URL of the
//! request that produced them.

/// Resolve a potentially relative `Location` value against a base URL.
///
/// # Algorithm
///
/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// NOTE: This is a simplified resolver, not the URL Standard's full parsing
/// algorithm. It covers the forms servers actually send in `Location`
/// headers: absolute URLs, scheme-relative `//host/path`, root-relative
/// `/path`, and directory-relative `path`.
#[must_use]
pub fn resolve_location(base: &str, location: &str) -> String {
    // STEP 1: Absolute URL — taken as-is.
    //
    // [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
    // "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
    // followed by a scheme-specific part."
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }

    // Scheme-relative URL — prepend the base URL's scheme.
    if location.starts_with("//") {
        let scheme = if base.starts_with("https:") {
            "https:"
        } else {
            "http:"
        };
        return format!("{scheme}{location}");
    }

    // STEP 2: Root-relative path — join with the base URL's origin.
    //
    // "http://x.com/a/" + "/b" resolves to "http://x.com/b": the path
    // replaces everything after the origin.
    if location.starts_with('/') {
        return origin(base).map_or_else(|| location.to_string(), |org| format!("{org}{location}"));
    }

    // Directory-relative path — join with the base URL's directory.
    let base_dir = base.rsplit_once('/').map_or(base, |(dir, _)| dir);
    format!("{base_dir}/{location}")
}

/// Extract the origin (`scheme://host[:port]`) of an absolute URL.
///
/// Returns `None` if `url` has no `://` scheme separator.
fn origin(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")?;
    let after_scheme = &url[scheme_end + 3..];
    match after_scheme.find('/') {
        Some(path_start) => Some(&url[..scheme_end + 3 + path_start]),
        None => Some(url),
    }
}
