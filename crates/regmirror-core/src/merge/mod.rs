//! Consolidation of mirror sets that share a source.
//!
//! Any number of policy entries, from either policy kind, may name the same
//! source. They collapse into one `MirrorSet` per source:
//! - mirrors are deduplicated by host, and tag resolution is kept if any
//!   contributing entry grants it for that host
//! - the fallback policy is `NeverContactSource` if any entry asks for it
//!
//! Both rules are commutative, so the result does not depend on input order.
//! Output is sorted explicitly (sets by source, mirrors by host) since the
//! grouping maps iterate in arbitrary order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::mem;

use crate::mirror_set::{Mirror, MirrorSet};

/// Merge `sets` into exactly one `MirrorSet` per distinct source, sorted.
pub fn merge_mirror_sets(sets: Vec<MirrorSet>) -> Vec<MirrorSet> {
    let mut unique: HashMap<String, MirrorSet> = HashMap::new();

    for set in sets {
        match unique.entry(set.source.clone()) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                tracing::debug!(source = %set.source, "merging duplicate mirror set");
                existing.mirrors = merge_mirrors(mem::take(&mut existing.mirrors), set.mirrors);
                let merged = existing.source_policy.merge(set.source_policy);
                if merged != existing.source_policy {
                    tracing::debug!(
                        source = %set.source,
                        "fallback policy tightened to NeverContactSource"
                    );
                }
                existing.source_policy = merged;
            }
            Entry::Vacant(slot) => {
                // Dedup even single entries; a policy may list a mirror twice.
                let mirrors = merge_mirrors(Vec::new(), set.mirrors);
                slot.insert(MirrorSet { mirrors, ..set });
            }
        }
    }

    let mut result: Vec<MirrorSet> = unique.into_values().collect();
    sort_mirror_sets(&mut result);
    result
}

/// Union two mirror lists keyed by host, sorted by host.
///
/// A host present on both sides resolves tags if either side does.
pub fn merge_mirrors(existing: Vec<Mirror>, incoming: Vec<Mirror>) -> Vec<Mirror> {
    let mut unique: HashMap<String, bool> = HashMap::new();

    for mirror in existing.into_iter().chain(incoming) {
        match unique.entry(mirror.host) {
            Entry::Occupied(mut slot) => {
                if mirror.resolve_tags && !*slot.get() {
                    tracing::debug!(host = %slot.key(), "mirror upgraded to tag resolution");
                    slot.insert(true);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(mirror.resolve_tags);
            }
        }
    }

    let mut result: Vec<Mirror> = unique
        .into_iter()
        .map(|(host, resolve_tags)| Mirror { host, resolve_tags })
        .collect();
    result.sort_by(|a, b| a.host.cmp(&b.host));
    result
}

/// Sort each set's mirrors by host and the sets themselves by source, in place.
pub fn sort_mirror_sets(sets: &mut [MirrorSet]) {
    for set in sets.iter_mut() {
        set.mirrors.sort_by(|a, b| a.host.cmp(&b.host));
    }
    sets.sort_by(|a, b| a.source.cmp(&b.source));
}
