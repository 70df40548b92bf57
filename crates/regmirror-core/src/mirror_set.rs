//! Per-source mirror records built from policy entries.

use crate::hostname::{extract_hostname, extract_mirror_url};
use crate::policy::{ImageDigestMirrorSet, ImageTagMirrorSet, MirrorEntry, SourcePolicy};

/// A single alternate pull location for a source repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mirror {
    /// Mirror address plus any namespaces not shared with the source (no scheme).
    pub host: String,
    /// Whether the runtime may resolve a tag into a digest against this mirror.
    pub resolve_tags: bool,
}

impl Mirror {
    /// Build a mirror entry for `mirror_image`, trimmed relative to `source_image`.
    pub fn new(source_image: &str, mirror_image: &str, resolve_tags: bool) -> Self {
        // Trimming identical references would leave nothing, so keep the host.
        let host = if source_image == mirror_image {
            extract_hostname(mirror_image)
        } else {
            extract_mirror_url(source_image, mirror_image)
        };
        Self { host, resolve_tags }
    }
}

/// Mirror configuration for one source repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSet {
    /// Registry host being mirrored.
    pub source: String,
    /// Mirrors in input order until merged, then sorted by host.
    pub mirrors: Vec<Mirror>,
    pub source_policy: SourcePolicy,
}

impl MirrorSet {
    pub fn new<S: AsRef<str>>(
        source_image: &str,
        mirror_images: &[S],
        resolve_tags: bool,
        source_policy: SourcePolicy,
    ) -> Self {
        let mirrors = mirror_images
            .iter()
            .map(|m| Mirror::new(source_image, m.as_ref(), resolve_tags))
            .collect();
        Self {
            source: extract_hostname(source_image),
            mirrors,
            source_policy,
        }
    }

    fn from_entry(entry: &MirrorEntry, resolve_tags: bool) -> Self {
        Self::new(
            &entry.source,
            entry.mirrors.as_slice(),
            resolve_tags,
            entry.mirror_source_policy,
        )
    }
}

/// One unmerged `MirrorSet` per policy entry: digest policies first, then tag
/// policies, each in input order.
pub fn build_all(digest: &[ImageDigestMirrorSet], tag: &[ImageTagMirrorSet]) -> Vec<MirrorSet> {
    let digest_sets = digest.iter().flat_map(|policy| {
        tracing::trace!(name = ?policy.metadata.name, "building digest mirror sets");
        policy
            .entries()
            .iter()
            .map(|entry| MirrorSet::from_entry(entry, false))
    });
    let tag_sets = tag.iter().flat_map(|policy| {
        tracing::trace!(name = ?policy.metadata.name, "building tag mirror sets");
        policy
            .entries()
            .iter()
            .map(|entry| MirrorSet::from_entry(entry, true))
    });
    digest_sets.chain(tag_sets).collect()
}
