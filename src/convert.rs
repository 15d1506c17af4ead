//! High-level orchestration: EAD file in, label tables out.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Document;
use tracing::{info, instrument};

use crate::error::{LabelError, Result};
use crate::filter;
use crate::finalize;
use crate::io::{excel_write, json_write};
use crate::model::{BoxTable, CollectionInfo, FolderTable, NumberingMode};
use crate::numbering::{self, EngineReport};

/// Output representation of the generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Json,
}

/// Options controlling a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Numbering preference applied when the source has no explicit numbering.
    pub numbering: NumberingMode,
    pub format: OutputFormat,
    /// Restrict output to these bare box identifiers.
    pub boxes: Option<Vec<String>>,
    /// Restrict output to these series labels.
    pub series: Option<Vec<String>>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            numbering: NumberingMode::Continuous,
            format: OutputFormat::Xlsx,
            boxes: None,
            series: None,
        }
    }
}

/// Everything produced from one finding aid.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionTables {
    pub info: CollectionInfo,
    pub folders: FolderTable,
    pub boxes: BoxTable,
    pub report: EngineReport,
}

/// Result of a full generation run, for user-facing reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub info: CollectionInfo,
    pub folder_rows: usize,
    pub box_rows: usize,
    pub skipped_components: usize,
    /// True when the reserved box sentinel appears in the output and box data
    /// needs manual verification before labels are printed.
    pub flagged: bool,
    pub folder_path: PathBuf,
    pub box_path: PathBuf,
}

/// Parses an EAD document and builds the finalized folder and box tables.
#[instrument(level = "info", skip_all)]
pub fn build_tables(source: &str, preference: NumberingMode) -> Result<CollectionTables> {
    let doc = Document::parse(source)?;
    let info = crate::ead::collection_info(&doc);
    info!(collection = %info.collection, call_number = %info.call_number, "processing collection");

    let (mut folders, report) = numbering::populate_folder_table(&doc, &info);
    info!(
        rows = folders.len(),
        skipped = report.skipped.len(),
        "folder table populated"
    );

    let mode = finalize::resolve_numbering(report.folders_already_numbered(), preference);
    let boxes = finalize::finalize_tables(&mut folders, &info, mode);

    Ok(CollectionTables {
        info,
        folders,
        boxes,
        report,
    })
}

/// Processes one finding aid file end to end and writes the two tables next
/// to each other in `out_dir`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), out_dir = %out_dir.display())
)]
pub fn generate(input: &Path, out_dir: &Path, options: &GenerateOptions) -> Result<GenerateSummary> {
    if !input.exists() {
        return Err(LabelError::MissingInput(input.to_path_buf()));
    }

    let source = fs::read_to_string(input)?;
    let tables = build_tables(&source, options.numbering)?;
    let CollectionTables {
        info,
        mut folders,
        mut boxes,
        report,
    } = tables;

    if let Some(selected) = &options.boxes {
        folders = filter::filter_folders_by_box(&folders, selected);
        boxes = filter::filter_boxes_by_box(&boxes, selected);
    }
    if let Some(selected) = &options.series {
        folders = filter::filter_folders_by_series(&folders, selected);
        boxes = filter::filter_boxes_by_series(&boxes, selected);
    }

    let flagged = finalize::flagged_boxes_present(&folders, &boxes);

    let stem = file_stem(&info);
    let extension = match options.format {
        OutputFormat::Xlsx => "xlsx",
        OutputFormat::Json => "json",
    };
    let folder_path = out_dir.join(format!("{stem}_folder.{extension}"));
    let box_path = out_dir.join(format!("{stem}_box.{extension}"));

    match options.format {
        OutputFormat::Xlsx => {
            excel_write::write_folder_workbook(&folder_path, &folders)?;
            excel_write::write_box_workbook(&box_path, &boxes)?;
        }
        OutputFormat::Json => {
            json_write::write_folder_json(&folder_path, &folders)?;
            json_write::write_box_json(&box_path, &boxes)?;
        }
    }

    info!(
        folders = folders.len(),
        boxes = boxes.len(),
        "label tables written"
    );

    Ok(GenerateSummary {
        info,
        folder_rows: folders.len(),
        box_rows: boxes.len(),
        skipped_components: report.skipped.len(),
        flagged,
        folder_path,
        box_path,
    })
}

/// `<collection>_<call number>` with path-hostile characters replaced.
fn file_stem(info: &CollectionInfo) -> String {
    let raw = format!("{}_{}", info.collection, info.call_number);
    raw.chars()
        .map(|ch| {
            if ch == '/' || ch == '\\' || ch == ':' || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect()
}
