//! Site normalization
//!
//! Converts arbitrary user-supplied site strings into the canonical host key
//! used for storage and lookup. Two inputs that denote the same host must
//! normalize to the same key regardless of case, scheme, or a leading
//! `www.` prefix.

use url::Url;

/// Normalize a raw site string into its canonical host key.
///
/// Trims surrounding whitespace, lower-cases, prepends `http://` when no
/// scheme is present so the URL parser can extract the host, then strips a
/// leading `www.`. Inputs with no extractable host yield an empty string;
/// callers treat that as a degenerate key and reject it for mutations.
///
/// Pure and stateless; safe to call concurrently.
///
/// # Examples
///
/// ```
/// use binvault_common::normalize;
///
/// assert_eq!(normalize("example.com"), "example.com");
/// assert_eq!(normalize("HTTPS://WWW.EXAMPLE.COM/path"), "example.com");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let site = raw.trim().to_lowercase();

    // Prepend a default scheme so schemeless inputs still parse as absolute URLs
    let with_scheme = if site.starts_with("http") {
        site
    } else {
        format!("http://{site}")
    };

    match Url::parse(&with_scheme) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        // Degenerate input (no parseable host) maps to the empty key
        Err(_) => String::new(),
    }
}
