use crate::domain::models::ConfigFile;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Raw bytes of a series source plus where they came from.
pub struct RawSource {
    pub path: Option<PathBuf>,
    pub label: String,
    pub bytes: Vec<u8>,
}

impl RawSource {
    pub fn sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/grossmass/config.toml"))
}

/// Load the config file; a missing default file means defaults. An explicit
/// path must exist.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(ConfigFile::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
    let config: ConfigFile = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Read a file, or stdin for `-`.
pub fn read_source(path: &Path) -> anyhow::Result<RawSource> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        return Ok(RawSource {
            path: None,
            label: "<stdin>".to_string(),
            bytes,
        });
    }
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("failed to read file {}: {}", path.display(), e))?;
    Ok(RawSource {
        path: Some(path.to_path_buf()),
        label: path.display().to_string(),
        bytes,
    })
}

pub fn inline_source(values: &[String]) -> RawSource {
    RawSource {
        path: None,
        label: "<args>".to_string(),
        bytes: values.join("\n").into_bytes(),
    }
}

pub fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("failed to write file {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), "adjusted source written");
    Ok(())
}
