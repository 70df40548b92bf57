//! Host extraction from OCI image references.
//!
//! Image references are treated as plain `/`-separated paths
//! (`host[:port]/namespace/.../name`). Nothing past the separator split is
//! validated; malformed input degrades to an empty or partial host.

/// Separates the registry host, namespaces, and image name in an image reference.
pub const IMAGE_PATH_SEPARATOR: char = '/';

/// Returns the leading registry host of an image reference.
///
/// # Examples
///
/// - `extract_hostname("mcr.microsoft.com/oss/kubernetes/pause:3.9")` → `"mcr.microsoft.com"`
/// - `extract_hostname("localhost:5000")` → `"localhost:5000"`
pub fn extract_hostname(image: &str) -> String {
    image
        .split(IMAGE_PATH_SEPARATOR)
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Drops the path suffix that `mirror` shares with `source`, keeping only the
/// leading host and namespaces unique to the mirror.
///
/// containerd re-appends the shared suffix when it resolves a mirror, so
/// recording it here would duplicate the path at pull time. Identical inputs
/// trim to the empty string; callers must special-case them.
pub fn extract_mirror_url(source: &str, mirror: &str) -> String {
    let source_parts: Vec<&str> = source.split(IMAGE_PATH_SEPARATOR).collect();
    let mirror_parts: Vec<&str> = mirror.split(IMAGE_PATH_SEPARATOR).collect();

    let shared = source_parts
        .iter()
        .rev()
        .zip(mirror_parts.iter().rev())
        .take_while(|(s, m)| s == m)
        .count();

    mirror_parts[..mirror_parts.len() - shared].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_is_first_segment() {
        assert_eq!(
            extract_hostname("mcr.microsoft.com/oss/kubernetes/pause:3.9"),
            "mcr.microsoft.com"
        );
        assert_eq!(extract_hostname("quay.io:443/ns/img"), "quay.io:443");
    }

    #[test]
    fn hostname_without_separator_is_whole_string() {
        assert_eq!(extract_hostname("registry.io"), "registry.io");
        assert_eq!(extract_hostname(""), "");
    }

    #[test]
    fn mirror_url_drops_full_shared_suffix() {
        assert_eq!(
            extract_mirror_url("registry.io/a/b/img", "mirror.io/a/b/img"),
            "mirror.io"
        );
    }

    #[test]
    fn mirror_url_keeps_unique_namespaces() {
        assert_eq!(
            extract_mirror_url("registry.io/a/b/img", "mirror.io/x/img"),
            "mirror.io/x"
        );
        assert_eq!(
            extract_mirror_url("registry.io/a/img", "mirror.io/a/other"),
            "mirror.io/a/other"
        );
    }

    #[test]
    fn mirror_url_stops_at_first_mismatch_from_the_end() {
        // "a" matches positionally from the front but not from the back.
        assert_eq!(
            extract_mirror_url("registry.io/a/b/img", "mirror.io/a/c/img"),
            "mirror.io/a/c"
        );
    }

    #[test]
    fn mirror_url_longer_source_than_mirror() {
        assert_eq!(
            extract_mirror_url("registry.io/deep/ns/img", "mirror.io/img"),
            "mirror.io"
        );
    }

    #[test]
    fn mirror_url_bare_hosts() {
        assert_eq!(extract_mirror_url("registry.io", "mirror.io"), "mirror.io");
        assert_eq!(extract_mirror_url("registry.io", "registry.io"), "");
    }
}
