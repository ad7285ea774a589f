//! JSON persistence for weights and checkpoints.
//!
//! Files are written to a temporary sibling and renamed into place, so
//! concurrent readers of the output path never observe a partial file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes `value` as pretty-printed JSON at `path`.
///
/// Parent directories are created as needed. The write goes through a
/// `.tmp` sibling followed by a rename.
///
/// # Errors
///
/// Any I/O or serialization failure; write failures are fatal to training,
/// so callers propagate them.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");
    {
        let file = File::create(&tmp)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", tmp.display(), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)
        .map_err(|e| anyhow::anyhow!("Failed to replace {}: {}", path.display(), e))?;
    Ok(())
}

/// Deserializes JSON from `path`.
///
/// # Returns
///
/// `Ok(None)` when the file does not exist; the parsed value otherwise.
///
/// # Errors
///
/// Any other read or parse failure, for callers to log and treat as a
/// load failure.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(anyhow::anyhow!(
                "Failed to open {}: {}",
                path.display(),
                err
            ));
        }
    };
    let value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
    Ok(Some(value))
}
