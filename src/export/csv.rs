use std::path::Path;

use crate::error::{ReportError, Result};
use crate::export::rows::{flatten, HEADERS};
use crate::export::{create_file, ensure_parent_dir};
use crate::items::ControllerItem;

/// One row per container, header first. Controllers without containers are
/// left out entirely.
pub fn write(items: &[ControllerItem], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = ::csv::Writer::from_writer(create_file(path)?);

    writer.write_record(HEADERS)?;
    for item in items {
        for row in flatten(item) {
            writer.write_record(row.iter().map(ToString::to_string))?;
        }
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;
    Ok(())
}
