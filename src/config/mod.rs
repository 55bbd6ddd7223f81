#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{ActivityArgs, TranslationArgs};
pub use toml_config::SheetsConfig;

use std::path::{Path, PathBuf};

/// Nearest ancestor of `start` that looks like the front-end project
/// (contains `package.json` or a `src/` directory). Falls back to `start`.
pub fn project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join("package.json").exists() || dir.join("src").is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| start.to_path_buf())
}
