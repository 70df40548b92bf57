pub mod config;
pub mod logging;

pub mod hostname;
pub mod merge;
pub mod mirror_set;
pub mod policy;
pub mod registry_config;
pub mod render;

pub use mirror_set::{Mirror, MirrorSet};
pub use policy::{PolicyBundle, SourcePolicy};
pub use registry_config::RegistryConfig;
