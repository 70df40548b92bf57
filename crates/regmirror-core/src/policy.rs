//! Cluster mirror policy objects (digest- and tag-based).
//!
//! These mirror the shape of the cluster API's `ImageDigestMirrorSet` and
//! `ImageTagMirrorSet` resources closely enough to decode them from JSON, and
//! also accept the same structure written as TOML. Fetching them from the
//! cluster is the caller's concern.

use serde::{Deserialize, Serialize};

/// Fallback behaviour when every mirror pull fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourcePolicy {
    /// The source repository may be contacted as a last resort.
    #[default]
    AllowContactingSource,
    /// The source repository must never be contacted.
    NeverContactSource,
}

impl SourcePolicy {
    /// Combine two policies for the same source. `NeverContactSource` wins
    /// regardless of argument order.
    pub fn merge(self, other: SourcePolicy) -> SourcePolicy {
        if self.is_never() || other.is_never() {
            SourcePolicy::NeverContactSource
        } else {
            SourcePolicy::AllowContactingSource
        }
    }

    pub fn is_never(self) -> bool {
        self == SourcePolicy::NeverContactSource
    }
}

/// One source-to-mirrors mapping inside a policy object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorEntry {
    /// Image repository being mirrored, e.g. `registry.example.com/ns/img`.
    pub source: String,
    /// Mirror repositories, in the order the policy lists them.
    #[serde(default)]
    pub mirrors: Vec<String>,
    #[serde(default)]
    pub mirror_source_policy: SourcePolicy,
}

impl MirrorEntry {
    pub fn new(
        source: impl Into<String>,
        mirrors: impl IntoIterator<Item = impl Into<String>>,
        mirror_source_policy: SourcePolicy,
    ) -> Self {
        Self {
            source: source.into(),
            mirrors: mirrors.into_iter().map(Into::into).collect(),
            mirror_source_policy,
        }
    }
}

/// Object metadata; only the name is kept, for log messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: Option<String>,
}

/// Digest-based mirror policy. Mirrors built from it may only pull by digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDigestMirrorSet {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ImageDigestMirrorSetSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDigestMirrorSetSpec {
    #[serde(default)]
    pub image_digest_mirrors: Vec<MirrorEntry>,
}

impl ImageDigestMirrorSet {
    pub fn from_entries(entries: Vec<MirrorEntry>) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec: ImageDigestMirrorSetSpec {
                image_digest_mirrors: entries,
            },
        }
    }

    pub fn entries(&self) -> &[MirrorEntry] {
        &self.spec.image_digest_mirrors
    }
}

/// Tag-based mirror policy. Mirrors built from it may also resolve tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTagMirrorSet {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ImageTagMirrorSetSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTagMirrorSetSpec {
    #[serde(default)]
    pub image_tag_mirrors: Vec<MirrorEntry>,
}

impl ImageTagMirrorSet {
    pub fn from_entries(entries: Vec<MirrorEntry>) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec: ImageTagMirrorSetSpec {
                image_tag_mirrors: entries,
            },
        }
    }

    pub fn entries(&self) -> &[MirrorEntry] {
        &self.spec.image_tag_mirrors
    }
}

/// Error decoding a policy bundle.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid policy TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Both policy collections as handed to the synthesizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyBundle {
    #[serde(default)]
    pub image_digest_mirror_sets: Vec<ImageDigestMirrorSet>,
    #[serde(default)]
    pub image_tag_mirror_sets: Vec<ImageTagMirrorSet>,
}

impl PolicyBundle {
    pub fn from_json_str(data: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, PolicyError> {
        Ok(toml::from_str(data)?)
    }

    /// Append another bundle's policies after this one's.
    pub fn extend(&mut self, other: PolicyBundle) {
        self.image_digest_mirror_sets
            .extend(other.image_digest_mirror_sets);
        self.image_tag_mirror_sets.extend(other.image_tag_mirror_sets);
    }

    /// Total number of source entries across both policy kinds.
    pub fn entry_count(&self) -> usize {
        let digest: usize = self
            .image_digest_mirror_sets
            .iter()
            .map(|s| s.entries().len())
            .sum();
        let tag: usize = self
            .image_tag_mirror_sets
            .iter()
            .map(|s| s.entries().len())
            .sum();
        digest + tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_policy_merge_is_order_independent() {
        use SourcePolicy::*;
        assert_eq!(AllowContactingSource.merge(NeverContactSource), NeverContactSource);
        assert_eq!(NeverContactSource.merge(AllowContactingSource), NeverContactSource);
        assert_eq!(NeverContactSource.merge(NeverContactSource), NeverContactSource);
        assert_eq!(
            AllowContactingSource.merge(AllowContactingSource),
            AllowContactingSource
        );
    }

    #[test]
    fn bundle_from_cluster_json() {
        let json = r#"{
            "imageDigestMirrorSets": [
                {
                    "metadata": { "name": "digest-mirrors" },
                    "spec": {
                        "imageDigestMirrors": [
                            {
                                "source": "registry.example.com/ns/img",
                                "mirrors": ["mirror.example.com/ns/img"],
                                "mirrorSourcePolicy": "NeverContactSource"
                            }
                        ]
                    }
                }
            ],
            "imageTagMirrorSets": [
                {
                    "spec": {
                        "imageTagMirrors": [
                            { "source": "quay.io/team/app", "mirrors": [] }
                        ]
                    }
                }
            ]
        }"#;
        let bundle = PolicyBundle::from_json_str(json).unwrap();
        assert_eq!(bundle.entry_count(), 2);

        let digest = &bundle.image_digest_mirror_sets[0];
        assert_eq!(digest.metadata.name.as_deref(), Some("digest-mirrors"));
        let entry = &digest.entries()[0];
        assert_eq!(entry.source, "registry.example.com/ns/img");
        assert_eq!(entry.mirrors, vec!["mirror.example.com/ns/img"]);
        assert_eq!(entry.mirror_source_policy, SourcePolicy::NeverContactSource);

        let tag = &bundle.image_tag_mirror_sets[0].entries()[0];
        assert!(tag.mirrors.is_empty());
        assert_eq!(tag.mirror_source_policy, SourcePolicy::AllowContactingSource);
    }

    #[test]
    fn bundle_from_toml() {
        let toml = r#"
            [[imageTagMirrorSets]]
            [[imageTagMirrorSets.spec.imageTagMirrors]]
            source = "docker.io/library/busybox"
            mirrors = ["mirror.local/library/busybox"]
            mirrorSourcePolicy = "AllowContactingSource"
        "#;
        let bundle = PolicyBundle::from_toml_str(toml).unwrap();
        assert!(bundle.image_digest_mirror_sets.is_empty());
        assert_eq!(bundle.image_tag_mirror_sets.len(), 1);
        assert_eq!(
            bundle.image_tag_mirror_sets[0].entries()[0].source,
            "docker.io/library/busybox"
        );
    }

    #[test]
    fn bundle_rejects_unknown_policy_value() {
        let json = r#"{
            "imageDigestMirrorSets": [
                { "spec": { "imageDigestMirrors": [
                    { "source": "a.io/x", "mirrorSourcePolicy": "Sometimes" }
                ] } }
            ]
        }"#;
        let err = PolicyBundle::from_json_str(json).unwrap_err();
        assert!(matches!(err, PolicyError::Json(_)));
    }

    #[test]
    fn bundle_extend_preserves_order() {
        let mut a = PolicyBundle::default();
        a.image_digest_mirror_sets
            .push(ImageDigestMirrorSet::from_entries(vec![MirrorEntry::new(
                "a.io/x",
                ["m.io/x"],
                SourcePolicy::AllowContactingSource,
            )]));
        let mut b = PolicyBundle::default();
        b.image_digest_mirror_sets
            .push(ImageDigestMirrorSet::from_entries(vec![MirrorEntry::new(
                "b.io/x",
                ["m.io/x"],
                SourcePolicy::AllowContactingSource,
            )]));
        a.extend(b);
        assert_eq!(a.image_digest_mirror_sets.len(), 2);
        assert_eq!(a.image_digest_mirror_sets[1].entries()[0].source, "b.io/x");
    }
}
