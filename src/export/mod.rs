//! Report writers. Each one reads the same collected slice and produces one file.

pub mod csv;
pub mod excel;
pub mod json;
pub mod rows;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ReportError, Result};
use crate::items::ControllerItem;

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Requested output files. `None` skips that format.
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub excel: Option<PathBuf>,
    pub sheet: String,
}

impl Outputs {
    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.csv.is_none() && self.excel.is_none()
    }
}

/// Run the requested writers in order JSON, CSV, spreadsheet. The first
/// failure stops the rest; files already written stay on disk.
pub fn write_all(items: &[ControllerItem], outputs: &Outputs) -> Result<()> {
    if let Some(path) = &outputs.json {
        json::write(items, path)?;
        info!(path = %path.display(), "wrote JSON report");
    }
    if let Some(path) = &outputs.csv {
        csv::write(items, path)?;
        info!(path = %path.display(), "wrote CSV report");
    }
    if let Some(path) = &outputs.excel {
        excel::write(items, path, &outputs.sheet)?;
        info!(path = %path.display(), sheet = %outputs.sheet, "wrote spreadsheet report");
    }
    Ok(())
}

/// Make sure the directory that will hold `path` exists, creating it
/// (owner-only on Unix) when missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => return Ok(()),
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => return Err(ReportError::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ReportError::io(dir, e)),
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(|e| ReportError::io(dir, e))
}

/// Create or truncate `path`, readable by the owner only on Unix.
pub fn create_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path).map_err(|e| ReportError::io(path, e))
}
