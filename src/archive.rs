use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::to_writer_pretty;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `value` wrapped in a one-element JSON array to `<dir>/<name>.json`,
/// create-or-truncate, readable by the owner only. Every archive document is
/// a JSON array, even when it holds a single value.
pub fn write_archive<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    let path = dir.join(format!("{name}.json"));

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options
        .open(&path)
        .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;

    let mut writer = BufWriter::new(file);
    to_writer_pretty(&mut writer, &[value]).map_err(|e| Error::Serialize {
        name: name.to_string(),
        source: e,
    })?;

    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to write {}", path.display()), e))
}
