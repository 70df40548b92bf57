//! CLI command handlers. Each command is in its own file.

mod generate;
mod load;
mod show;

pub use generate::run_generate;
pub use show::run_show;

#[cfg(test)]
pub(crate) use generate::{output_root, write_blocks, write_hosts_files};
#[cfg(test)]
pub(crate) use load::load_policy_files;
