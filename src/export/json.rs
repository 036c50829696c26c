use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::export::ensure_parent_dir;
use crate::items::ControllerItem;

#[derive(Serialize)]
struct Document<'a> {
    #[serde(skip_serializing_if = "is_empty")]
    responses: &'a [ControllerItem],
}

fn is_empty(items: &&[ControllerItem]) -> bool {
    items.is_empty()
}

/// Write `{"responses": [...]}` to `path`. The document goes to a temp file
/// next to the target and is renamed over it once fully written.
pub fn write(items: &[ControllerItem], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let body = serde_json::to_vec(&Document { responses: items })?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| ReportError::io(dir, e))?;
    file.write_all(&body)
        .map_err(|e| ReportError::io(file.path(), e))?;
    file.persist(path)
        .map_err(|e| ReportError::io(path, e.error))?;
    Ok(())
}
