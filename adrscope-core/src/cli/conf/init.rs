use crate::conf::AnalysisConfig;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let contents = default_config_toml()?;
    write_file(&path, &contents)?;

    println!("✔ Wrote default analysis config to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  adrscope config check {}", path.display());
    println!("  adrscope analyze <log> --config {}", path.display());

    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&AnalysisConfig::default()).context("failed to render default config")
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to create {}", path.display()))
}
