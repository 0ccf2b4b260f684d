//! Atomic output of the encoded table.

use crate::error::BuildError;
use crate::range::RangeEntry;
use crate::table::{self, GeoTable};
use anyhow::{Context, Result};
use std::io::BufWriter;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Encode `entries` to `path`, creating parent directories as needed.
///
/// The table is written to a temporary file beside the target, synced,
/// checked with [`verify_table`], and only then renamed into place. On any
/// error the temporary file is removed and an existing file at `path` is left
/// as it was. Returns the bytes written.
pub fn write_table(path: &Path, entries: &[RangeEntry]) -> Result<u64> {
    write_table_with(path, entries, |written| verify_table(written, entries.len()))
}

/// [`write_table`] with a custom check run against the synced temporary file.
pub fn write_table_with<F>(path: &Path, entries: &[RangeEntry], verify: F) -> Result<u64>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create output directory: {:?}", parent))?;

    let temp_file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;

    let mut out = BufWriter::new(temp_file);
    table::encode(entries, &mut out)
        .with_context(|| format!("Failed to write table for {:?}", path))?;
    let temp_file = out
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush table")?;
    temp_file.as_file().sync_all()?;

    verify(temp_file.path())?;

    temp_file
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to persist table file: {:?}", path))?;

    Ok(table::encoded_len(entries.len()) as u64)
}

/// Re-read a written table and check its size and header count.
pub fn verify_table(path: &Path, expected_entries: usize) -> Result<()> {
    let size = std::fs::metadata(path)?.len();
    let expected_size = table::encoded_len(expected_entries) as u64;
    if size != expected_size {
        return Err(BuildError::Verification(format!(
            "{:?} is {} bytes, expected {}",
            path, size, expected_size
        ))
        .into());
    }

    let table = GeoTable::open(path)?;
    if table.len() != expected_entries {
        return Err(BuildError::Verification(format!(
            "{:?} holds {} entries, expected {}",
            path,
            table.len(),
            expected_entries
        ))
        .into());
    }
    info!("Verified {} entries", table.len());
    Ok(())
}
