//! Synthesized registry configuration: one merged mirror set per source.

use std::path::{Path, PathBuf};

use crate::merge::merge_mirror_sets;
use crate::mirror_set::{build_all, MirrorSet};
use crate::policy::{ImageDigestMirrorSet, ImageTagMirrorSet, PolicyBundle};

/// File name containerd looks for in each per-registry directory.
pub const DEFAULT_HOSTS_FILE_NAME: &str = "hosts.toml";

/// System-wide registry mirror configuration, sorted by source.
///
/// Recomputed from scratch on every call; nothing is cached between passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    source_configs: Vec<MirrorSet>,
}

impl RegistryConfig {
    /// Build and merge mirror sets from both policy kinds.
    pub fn new(digest: &[ImageDigestMirrorSet], tag: &[ImageTagMirrorSet]) -> Self {
        let all = build_all(digest, tag);
        let entries = all.len();
        let source_configs = merge_mirror_sets(all);
        tracing::info!(
            entries,
            sources = source_configs.len(),
            "synthesized registry mirror configuration"
        );
        Self { source_configs }
    }

    pub fn from_bundle(bundle: &PolicyBundle) -> Self {
        Self::new(
            &bundle.image_digest_mirror_sets,
            &bundle.image_tag_mirror_sets,
        )
    }

    pub fn mirror_sets(&self) -> &[MirrorSet] {
        &self.source_configs
    }

    pub fn len(&self) -> usize {
        self.source_configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_configs.is_empty()
    }

    /// Look up the merged set for a source host.
    pub fn find(&self, source: &str) -> Option<&MirrorSet> {
        self.source_configs
            .binary_search_by(|s| s.source.as_str().cmp(source))
            .ok()
            .map(|i| &self.source_configs[i])
    }

    /// `(source, hosts file contents)` for every source with at least one
    /// mirror, in source order.
    pub fn rendered(&self) -> Vec<(&str, String)> {
        self.source_configs
            .iter()
            .filter_map(|set| {
                let text = set.generate_config();
                if text.is_empty() {
                    tracing::debug!(source = %set.source, "no mirrors; omitting config");
                    None
                } else {
                    Some((set.source.as_str(), text))
                }
            })
            .collect()
    }
}

/// Where containerd expects the hosts file for `source` under `root`
/// (e.g. `/etc/containerd/certs.d/<source>/hosts.toml`).
pub fn hosts_file_path(root: &Path, source: &str, file_name: &str) -> PathBuf {
    root.join(source).join(file_name)
}
