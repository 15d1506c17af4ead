use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::model::{BOX_COLUMNS, BoxTable, FOLDER_COLUMNS, FolderTable};

/// Sheet name holding the folder table.
pub const FOLDER_SHEET: &str = "Folders";
/// Sheet name holding the box table.
pub const BOX_SHEET: &str = "Boxes";

/// Writes the folder table to a single-sheet workbook at the given path.
pub fn write_folder_workbook(path: &Path, table: &FolderTable) -> Result<()> {
    let rows: Vec<Vec<String>> = table.rows.iter().map(|row| row.cells()).collect();
    write_sheet(path, FOLDER_SHEET, &FOLDER_COLUMNS, &rows)
}

/// Writes the box table to a single-sheet workbook at the given path.
pub fn write_box_workbook(path: &Path, table: &BoxTable) -> Result<()> {
    let rows: Vec<Vec<String>> = table.rows.iter().map(|row| row.cells()).collect();
    write_sheet(path, BOX_SHEET, &BOX_COLUMNS, &rows)
}

fn write_sheet(path: &Path, sheet_name: &str, columns: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col_idx, header) in columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    let mut table = rust_xlsxwriter::Table::new();
    table.set_autofilter(true);
    let col_end = (columns.len() as u16).saturating_sub(1);
    let row_end = if rows.is_empty() { 0 } else { rows.len() as u32 };
    worksheet.add_table(0, 0, row_end, col_end, &table)?;

    workbook.save(path)?;
    Ok(())
}
