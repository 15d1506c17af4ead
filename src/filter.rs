//! Non-interactive selection of boxes and series.
//!
//! Selections are written as comma-separated lists with optional numeric
//! ranges, e.g. `"1, 3-5, 10A"`. Numeric ranges expand inclusively;
//! non-numeric tokens pass through verbatim so alphanumeric box identifiers
//! stay selectable.

use crate::error::{LabelError, Result};
use crate::model::{BoxTable, FolderTable};

/// Expands a selection expression into individual identifier values.
pub fn parse_selection(input: &str) -> Result<Vec<String>> {
    let mut values = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.split_once('-') {
            Some((start_raw, end_raw)) => {
                let start: u32 = start_raw
                    .trim()
                    .parse()
                    .map_err(|_| LabelError::InvalidSelection(token.to_string()))?;
                let end: u32 = end_raw
                    .trim()
                    .parse()
                    .map_err(|_| LabelError::InvalidSelection(token.to_string()))?;
                if start > end {
                    return Err(LabelError::InvalidSelection(token.to_string()));
                }
                values.extend((start..=end).map(|value| value.to_string()));
            }
            None => values.push(token.to_string()),
        }
    }
    if values.is_empty() {
        return Err(LabelError::InvalidSelection(input.to_string()));
    }
    Ok(values)
}

/// Keeps the folder rows belonging to the selected boxes. The finalized
/// folder table carries the "Box " display prefix, so the bare identifiers
/// are adjusted before matching.
pub fn filter_folders_by_box(table: &FolderTable, boxes: &[String]) -> FolderTable {
    let adjusted: Vec<String> = boxes.iter().map(|value| format!("Box {value}")).collect();
    FolderTable {
        rows: table
            .rows
            .iter()
            .filter(|row| adjusted.contains(&row.box_number))
            .cloned()
            .collect(),
        finalized: table.finalized,
    }
}

/// Keeps the box rows for the selected boxes; box identifiers in this table
/// are bare and matched as-is.
pub fn filter_boxes_by_box(table: &BoxTable, boxes: &[String]) -> BoxTable {
    BoxTable {
        rows: table
            .rows
            .iter()
            .filter(|row| boxes.contains(&row.box_number))
            .cloned()
            .collect(),
    }
}

/// Keeps the folder rows whose first ancestor matches one of the selected
/// series labels.
pub fn filter_folders_by_series(table: &FolderTable, series: &[String]) -> FolderTable {
    FolderTable {
        rows: table
            .rows
            .iter()
            .filter(|row| {
                row.ancestors[0]
                    .as_ref()
                    .is_some_and(|ancestor| series.contains(ancestor))
            })
            .cloned()
            .collect(),
        finalized: table.finalized,
    }
}

/// Keeps the box rows that saw any of the selected series labels.
pub fn filter_boxes_by_series(table: &BoxTable, series: &[String]) -> BoxTable {
    BoxTable {
        rows: table
            .rows
            .iter()
            .filter(|row| {
                row.series.iter().any(|label| {
                    label
                        .as_ref()
                        .is_some_and(|label| series.contains(label))
                })
            })
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_expands_ranges_and_keeps_tokens() {
        let values = parse_selection("1, 3-5, 10A").unwrap();
        assert_eq!(values, vec!["1", "3", "4", "5", "10A"]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(parse_selection("5-3").is_err());
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(parse_selection(" , ").is_err());
    }
}
