//! Table finalization: sorting, numbering resolution, and box aggregation.
//!
//! The finalizer runs once over a fully populated folder table. It sorts the
//! rows, resolves folder numbering according to the detected or requested
//! mode, rewrites the BOX/FOLDER columns with their display prefixes, and
//! derives the box summary table. Prefixing and filling are guarded so that
//! re-finalizing an already finalized table is a harmless no-op.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::extract::BOX_SENTINEL;
use crate::model::{
    ANCESTOR_SLOTS, BoxRow, BoxTable, CollectionInfo, FolderRow, FolderTable, NumberingMode,
};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Sort key for box identifiers. Purely alphabetic identifiers sort first by
/// raw text; identifiers containing digits sort by their first digit run,
/// with alphanumeric variants ("10A") placed directly before their numeric
/// sibling ("10").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum BoxKey {
    Text(String),
    Number {
        value: u64,
        /// False for alphanumeric identifiers; sorts them ahead of the plain
        /// number they extend.
        plain: bool,
        suffix: String,
    },
}

pub(crate) fn box_sort_key(box_number: &str) -> BoxKey {
    let Some(run) = DIGIT_RUN.find(box_number) else {
        return BoxKey::Text(box_number.to_string());
    };
    let Ok(value) = run.as_str().parse::<u64>() else {
        return BoxKey::Text(box_number.to_string());
    };
    let suffix = box_number[run.end()..].trim().to_string();
    BoxKey::Number {
        value,
        plain: suffix.is_empty(),
        suffix,
    }
}

/// First integer found in a folder value; 0 when absent.
pub(crate) fn folder_sort_key(folder: Option<&str>) -> u64 {
    folder
        .and_then(|value| DIGIT_RUN.find(value))
        .and_then(|run| run.as_str().parse().ok())
        .unwrap_or(0)
}

fn first_integer(value: &str) -> Option<u32> {
    DIGIT_RUN.find(value).and_then(|run| run.as_str().parse().ok())
}

/// Adds the display prefix unless the value already carries it.
fn prefix_once(prefix: &str, value: &str) -> String {
    if value.starts_with(prefix) {
        value.to_string()
    } else {
        format!("{prefix}{value}")
    }
}

/// Resolves the effective numbering mode: sources that already number their
/// folders force continuous behavior regardless of preference.
pub fn resolve_numbering(already_numbered: bool, preference: NumberingMode) -> NumberingMode {
    if already_numbered {
        NumberingMode::Continuous
    } else {
        preference
    }
}

/// Finalizes the folder table in place and derives the box table from it.
pub fn finalize_tables(
    folder_table: &mut FolderTable,
    info: &CollectionInfo,
    mode: NumberingMode,
) -> BoxTable {
    if folder_table.finalized {
        // Sorting and renumbering already happened; rebuilding the box table
        // is the only work left, and repeating the rewrite would reorder
        // filled folder numbers and re-prefix values.
        info!("folder table already finalized; rebuilding box table only");
        let mut box_table = aggregate_boxes(&folder_table.rows, info, mode);
        strip_box_prefix(&mut box_table);
        return box_table;
    }

    folder_table.rows.sort_by_cached_key(|row| {
        (
            box_sort_key(&row.box_number),
            folder_sort_key(row.folder.as_deref()),
        )
    });

    match mode {
        NumberingMode::Continuous => {
            for (index, row) in folder_table.rows.iter_mut().enumerate() {
                row.box_number = prefix_once("Box ", &row.box_number);
                let folder_value = row.folder.take().unwrap_or_else(|| (index + 1).to_string());
                row.folder = Some(prefix_once("Folder ", &folder_value));
            }
        }
        NumberingMode::NonContinuous => {
            for row in folder_table.rows.iter_mut() {
                row.box_number = prefix_once("Box ", &row.box_number);
            }
            // Sequential fill restarting at 1 whenever the box changes;
            // relies on the table being sorted by box above.
            let mut current_box: Option<String> = None;
            let mut counter = 1u32;
            for row in folder_table.rows.iter_mut() {
                if row.folder.is_none() {
                    if current_box.as_deref() != Some(row.box_number.as_str()) {
                        current_box = Some(row.box_number.clone());
                        counter = 1;
                    }
                    row.folder = Some(counter.to_string());
                    counter += 1;
                }
            }
            for row in folder_table.rows.iter_mut() {
                if let Some(folder) = row.folder.take() {
                    row.folder = Some(prefix_once("Folder ", &folder));
                }
            }
        }
    }

    let mut box_table = aggregate_boxes(&folder_table.rows, info, mode);
    strip_box_prefix(&mut box_table);

    folder_table.finalized = true;
    info!(
        folders = folder_table.len(),
        boxes = box_table.len(),
        "tables finalized"
    );
    box_table
}

/// The box table's BOX column holds the bare identifier; the folder table
/// keeps its display prefix. Intentional asymmetry.
fn strip_box_prefix(box_table: &mut BoxTable) {
    for row in box_table.rows.iter_mut() {
        row.box_number = row
            .box_number
            .strip_prefix("Box ")
            .unwrap_or(&row.box_number)
            .trim()
            .to_string();
    }
}

/// One pass over the sorted folder rows, one box row per distinct BOX value
/// in first-seen order.
fn aggregate_boxes(rows: &[FolderRow], info: &CollectionInfo, mode: NumberingMode) -> BoxTable {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&FolderRow>> = HashMap::new();
    for row in rows {
        let group = groups.entry(row.box_number.as_str()).or_default();
        if group.is_empty() {
            order.push(row.box_number.as_str());
        }
        group.push(row);
    }

    let mut box_table = BoxTable::default();
    for box_number in order {
        let group = &groups[box_number];

        let count = group.len();
        let folder_count = format!("{count} folder{}", if count == 1 { "" } else { "s" });

        let (first_folder, last_folder) = match mode {
            NumberingMode::Continuous => {
                let numbers: Vec<u32> = group
                    .iter()
                    .filter_map(|row| row.folder.as_deref().and_then(first_integer))
                    .collect();
                let first = numbers.iter().min().copied();
                let last = numbers.iter().max().copied().filter(|last| Some(*last) != first);
                (first, last)
            }
            NumberingMode::NonContinuous => (None, None),
        };

        let mut series: [Option<String>; ANCESTOR_SLOTS] = Default::default();
        let mut seen: Vec<&str> = Vec::new();
        for row in group.iter() {
            let Some(ancestor) = row.ancestors[0].as_deref() else {
                continue;
            };
            if seen.contains(&ancestor) {
                continue;
            }
            if seen.len() >= ANCESTOR_SLOTS {
                break;
            }
            series[seen.len()] = Some(ancestor.to_string());
            seen.push(ancestor);
        }

        let container_type = group
            .iter()
            .find_map(|row| row.container_type.clone());

        box_table.rows.push(BoxRow {
            repository: info.repository.clone(),
            collection: info.collection.clone(),
            call_number: info.call_number.clone(),
            box_number: box_number.to_string(),
            folder_count,
            first_folder,
            last_folder,
            container_type,
            series,
        });
    }

    box_table
}

/// True when either table still carries the reserved box sentinel and the
/// output needs manual verification before labels are printed.
pub fn flagged_boxes_present(folder_table: &FolderTable, box_table: &BoxTable) -> bool {
    let flagged = folder_table
        .rows
        .iter()
        .any(|row| row.box_number.contains(BOX_SENTINEL))
        || box_table
            .rows
            .iter()
            .any(|row| row.box_number.contains(BOX_SENTINEL));
    if flagged {
        warn!(
            sentinel = BOX_SENTINEL,
            "reserved box sentinel present; verify box data before printing labels"
        );
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabetic_boxes_sort_before_numeric() {
        assert!(box_sort_key("Flat file") < box_sort_key("1"));
    }

    #[test]
    fn alphanumeric_box_precedes_its_numeric_sibling() {
        assert!(box_sort_key("10A") < box_sort_key("10"));
        assert!(box_sort_key("2") < box_sort_key("10A"));
        assert!(box_sort_key("10") < box_sort_key("11"));
    }

    #[test]
    fn folder_key_defaults_to_zero() {
        assert_eq!(folder_sort_key(None), 0);
        assert_eq!(folder_sort_key(Some("no digits")), 0);
        assert_eq!(folder_sort_key(Some("Folder 17")), 17);
    }

    #[test]
    fn prefix_once_is_idempotent() {
        assert_eq!(prefix_once("Box ", "12"), "Box 12");
        assert_eq!(prefix_once("Box ", "Box 12"), "Box 12");
    }
}
