use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::schema::Config;

const HEADER: &str = "\
# Allie balance scoring configuration.
# Multipliers must decrease from the heaviest level to the lightest;
# child_development.none and priority.unranked must stay at 1.0.
";

/// Write the default configuration to `path`.
///
/// Refuses to replace an existing file unless `force` is set. The write is
/// atomic, so an interrupted run never leaves a half-written config behind.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&Config::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .context("Failed to write config")?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_written_config_loads_back() {
        let path = env::temp_dir().join("allie_test_init").join("config.yaml");
        let _ = std::fs::remove_file(&path);

        write_default_config(&path, false).unwrap();
        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config, Config::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let path = env::temp_dir().join("allie_test_init_exists.yaml");
        std::fs::write(&path, "names:\n  a: Kim\n").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        write_default_config(&path, true).unwrap();
        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.names.a, "Mama");

        let _ = std::fs::remove_file(&path);
    }
}
