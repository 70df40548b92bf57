//! `regmirror generate` – render containerd hosts files.

use anyhow::{Context, Result};
use regmirror_core::config::RegmirrorConfig;
use regmirror_core::registry_config::hosts_file_path;
use regmirror_core::render::LINE_ENDING;
use regmirror_core::RegistryConfig;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::load::load_policy_files;

pub fn run_generate(
    cfg: &RegmirrorConfig,
    policies: &[PathBuf],
    write: bool,
    output_dir: Option<&Path>,
) -> Result<()> {
    let bundle = load_policy_files(policies)?;
    let registry = RegistryConfig::from_bundle(&bundle);
    let rendered = registry.rendered();

    if !write {
        let stdout = io::stdout();
        write_blocks(&mut stdout.lock(), &rendered)?;
        return Ok(());
    }

    let root = output_root(cfg, output_dir);
    let written = write_hosts_files(root, &cfg.hosts_file_name, &rendered)?;
    println!("wrote {} hosts file(s) under {}", written.len(), root.display());
    Ok(())
}

/// `--output-dir` if given, else the configured directory.
pub(crate) fn output_root<'a>(
    cfg: &'a RegmirrorConfig,
    output_dir: Option<&'a Path>,
) -> &'a Path {
    output_dir.unwrap_or(cfg.output_dir.as_path())
}

/// A source host is used as one directory name under the output root.
fn is_safe_dir_name(source: &str) -> bool {
    !source.is_empty()
        && source != "."
        && source != ".."
        && !source.contains(['/', '\\'])
}

/// Print each block under a `# <source>` banner, blank line between blocks.
pub(crate) fn write_blocks<W: Write>(out: &mut W, rendered: &[(&str, String)]) -> Result<()> {
    for (i, (source, text)) in rendered.iter().enumerate() {
        if i > 0 {
            out.write_all(LINE_ENDING.as_bytes())?;
        }
        write!(out, "# {source}{LINE_ENDING}{text}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write `<root>/<source>/<file_name>` for each rendered block.
///
/// Sources that would not name a single directory under `root` are skipped.
pub(crate) fn write_hosts_files(
    root: &Path,
    file_name: &str,
    rendered: &[(&str, String)],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(rendered.len());
    for (source, text) in rendered {
        if !is_safe_dir_name(source) {
            tracing::warn!(
                source = %source,
                "source is not a plain host name; skipping hosts file"
            );
            continue;
        }
        let path = hosts_file_path(root, source, file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(source = %source, path = %path.display(), "wrote hosts file");
        written.push(path);
    }
    Ok(written)
}
