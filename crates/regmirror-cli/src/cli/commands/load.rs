//! Policy bundle loading from files.

use anyhow::{Context, Result};
use regmirror_core::policy::PolicyBundle;
use std::fs;
use std::path::{Path, PathBuf};

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}

/// Read and concatenate policy bundles in argument order.
pub fn load_policy_files(paths: &[PathBuf]) -> Result<PolicyBundle> {
    let mut bundle = PolicyBundle::default();
    for path in paths {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading policy file {}", path.display()))?;
        let next = if is_toml(path) {
            PolicyBundle::from_toml_str(&data)
        } else {
            PolicyBundle::from_json_str(&data)
        }
        .with_context(|| format!("parsing policy file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            entries = next.entry_count(),
            "loaded policy file"
        );
        bundle.extend(next);
    }
    Ok(bundle)
}
