use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::Ledger;

/// Get the default ledger path (~/.config/golf-handicap/ledger.yaml)
pub fn get_ledger_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("ledger.yaml"))
}

/// Load a ledger from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The ledger file does not exist
/// - The ledger file cannot be read
/// - The YAML cannot be parsed
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        anyhow::bail!(
            "Ledger not found at {}. Run `golf-handicap init` to create one",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger at {}", path.display()))?;

    let ledger: Ledger = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse ledger: invalid YAML in {}", path.display()))?;

    debug!(
        path = %path.display(),
        golfers = ledger.golfers.len(),
        courses = ledger.courses.len(),
        scores = ledger.scores.len(),
        "loaded ledger"
    );

    Ok(ledger)
}

/// Save a ledger to a YAML file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let yaml = serde_saphyr::to_string(ledger)
        .map_err(|e| anyhow::anyhow!("Failed to serialize ledger: {}", e))?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write ledger")?;
    file.commit().context("Failed to save ledger")?;

    debug!(path = %path.display(), "saved ledger");
    Ok(())
}
