use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{BoxTable, FolderTable};

/// Writes the folder rows as a pretty-printed JSON array.
pub fn write_folder_json(path: &Path, table: &FolderTable) -> Result<()> {
    let json = serde_json::to_string_pretty(&table.rows)?;
    fs::write(path, json)?;
    Ok(())
}

/// Writes the box rows as a pretty-printed JSON array.
pub fn write_box_json(path: &Path, table: &BoxTable) -> Result<()> {
    let json = serde_json::to_string_pretty(&table.rows)?;
    fs::write(path, json)?;
    Ok(())
}
