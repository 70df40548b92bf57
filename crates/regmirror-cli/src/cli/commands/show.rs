//! `regmirror show` – print the merged mirror table.

use anyhow::Result;
use regmirror_core::RegistryConfig;
use std::path::PathBuf;

use super::load::load_policy_files;

pub fn run_show(policies: &[PathBuf]) -> Result<()> {
    let bundle = load_policy_files(policies)?;
    let registry = RegistryConfig::from_bundle(&bundle);
    if registry.is_empty() {
        println!("No mirror policies found.");
        return Ok(());
    }

    println!("{:<32} {:<24} {:<40} {}", "SOURCE", "FALLBACK", "MIRROR", "CAPABILITIES");
    for set in registry.mirror_sets() {
        let fallback = format!("{:?}", set.source_policy);
        if set.mirrors.is_empty() {
            println!("{:<32} {:<24} {:<40} {}", set.source, fallback, "-", "-");
            continue;
        }
        for m in &set.mirrors {
            let caps = if m.resolve_tags { "pull,resolve" } else { "pull" };
            println!("{:<32} {:<24} {:<40} {}", set.source, fallback, m.host, caps);
        }
    }
    Ok(())
}
