//! containerd `hosts.toml` rendering for a merged mirror set.

use crate::mirror_set::MirrorSet;

/// containerd's hosts file parser expects CRLF line endings.
pub const LINE_ENDING: &str = "\r\n";

const SCHEME: &str = "https://";

impl MirrorSet {
    /// Render this set as a containerd registry host configuration.
    ///
    /// Returns an empty string when there are no mirrors; callers should omit
    /// such sources rather than write an empty file. Mirrors must already be
    /// sorted (see [`crate::merge::merge_mirror_sets`]) since the first one
    /// doubles as the fallback server under `NeverContactSource`.
    pub fn generate_config(&self) -> String {
        let Some(first) = self.mirrors.first() else {
            return String::new();
        };

        // Point the fallback at a mirror so the source is never contacted.
        let fallback = if self.source_policy.is_never() {
            &first.host
        } else {
            &self.source
        };

        let mut out = format!("server = \"{SCHEME}{fallback}\"{LINE_ENDING}{LINE_ENDING}");
        for mirror in &self.mirrors {
            // Digest mirrors can only pull by digest; tag mirrors may also resolve tags.
            let capabilities = if mirror.resolve_tags {
                r#"["pull", "resolve"]"#
            } else {
                r#"["pull"]"#
            };
            out.push_str(&format!(
                "[host.\"{SCHEME}{}\"]{LINE_ENDING}  capabilities = {capabilities}{LINE_ENDING}",
                mirror.host
            ));
        }
        out
    }
}
