//! The folder numbering engine.
//!
//! Each terminal component is classified by its container entries and
//! expanded into one or more folder rows. Explicitly numbered components
//! carry a folder-typed container whose text is a number or an inclusive
//! range; everything else falls back to implicit numbering, where the folder
//! count is inferred from physical-extent descriptors.
//!
//! Processing is partial-failure tolerant: a component that cannot be
//! expanded is reported with whatever title and date context can still be
//! recovered, and the walk continues with the next component.

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::ancestry;
use crate::ead;
use crate::extract;
use crate::model::{ANCESTOR_SLOTS, CollectionInfo, FolderRow, FolderTable};

/// A terminal component the engine had to give up on.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedComponent {
    pub title: String,
    pub date: String,
    pub reason: String,
}

/// Outcome of one engine run: row-mode tallies plus the skipped components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineReport {
    /// Rows produced from explicitly numbered components.
    pub explicit_rows: usize,
    /// Rows produced from implicitly numbered components.
    pub implicit_rows: usize,
    pub skipped: Vec<SkippedComponent>,
}

impl EngineReport {
    /// True when the source document already numbers the majority of its
    /// folders, forcing continuous finalization.
    pub fn folders_already_numbered(&self) -> bool {
        self.explicit_rows > self.implicit_rows
    }
}

enum Outcome {
    Emitted { rows: Vec<FolderRow>, explicit: bool },
    Skipped(SkippedComponent),
}

/// Walks every terminal component of the document and appends its folder rows
/// to a fresh table.
pub fn populate_folder_table(doc: &Document, info: &CollectionInfo) -> (FolderTable, EngineReport) {
    let mut table = FolderTable::new();
    let mut report = EngineReport::default();

    for component in ead::terminal_components(doc) {
        match process_component(component, info) {
            Outcome::Emitted { rows, explicit } => {
                if explicit {
                    report.explicit_rows += rows.len();
                } else {
                    report.implicit_rows += rows.len();
                }
                for row in rows {
                    table.push(row);
                }
            }
            Outcome::Skipped(skipped) => {
                warn!(
                    title = %skipped.title,
                    date = %skipped.date,
                    reason = %skipped.reason,
                    "skipping component"
                );
                report.skipped.push(skipped);
            }
        }
    }

    debug!(
        rows = table.len(),
        explicit = report.explicit_rows,
        implicit = report.implicit_rows,
        skipped = report.skipped.len(),
        "folder table populated"
    );
    (table, report)
}

fn process_component(component: Node, info: &CollectionInfo) -> Outcome {
    let Some(did) = ead::find_descendant(component, "did") else {
        return Outcome::Skipped(SkippedComponent {
            title: extract::TITLE_SENTINEL.to_string(),
            date: extract::DATE_SENTINEL.to_string(),
            reason: "component has no descriptive metadata block".to_string(),
        });
    };

    let ancestors = ancestry::pad_ancestors(ancestry::resolve_ancestors(component));
    let containers: Vec<Node> = did
        .children()
        .filter(|node| ead::is_ead_element(*node, "container"))
        .collect();
    let has_folder_container = containers.iter().any(|container| {
        container
            .attribute("type")
            .is_some_and(|value| value.eq_ignore_ascii_case("folder"))
    });

    if containers.len() >= 2 && has_folder_container {
        match explicit_rows(did, &containers, &ancestors, info) {
            Ok(rows) => Outcome::Emitted {
                rows,
                explicit: true,
            },
            Err(reason) => Outcome::Skipped(SkippedComponent {
                title: extract::base_title(did),
                date: extract::folder_date(did),
                reason,
            }),
        }
    } else {
        Outcome::Emitted {
            rows: implicit_rows(did, &ancestors, info),
            explicit: false,
        }
    }
}

/// Explicit mode: the folder-typed container's text supplies the folder
/// number(s). A hyphen marks an inclusive range; everything else is a literal
/// folder value.
fn explicit_rows(
    did: Node,
    containers: &[Node],
    ancestors: &[Option<String>; ANCESTOR_SLOTS],
    info: &CollectionInfo,
) -> Result<Vec<FolderRow>, String> {
    let folder_container = containers
        .iter()
        .find(|container| {
            container
                .attribute("type")
                .is_some_and(|value| value.eq_ignore_ascii_case("folder"))
        })
        .ok_or_else(|| "no folder-typed container entry".to_string())?;
    let folder_text = ead::element_text(*folder_container)
        .ok_or_else(|| "folder container has no text".to_string())?;

    let fields = ComponentFields::read(did, ancestors, info);

    if let Some((start_raw, end_raw)) = folder_text.split_once('-') {
        let start = parse_range_bound(start_raw)?;
        let end = parse_range_bound(end_raw)?;
        let total = end.saturating_sub(start).saturating_add(1);
        let rows = (start..=end)
            .map(|number| {
                let title = format!("{} [{} of {}]", fields.base_title, number - start + 1, total);
                fields.row(Some(number.to_string()), title)
            })
            .collect();
        Ok(rows)
    } else {
        Ok(vec![
            fields.row(Some(folder_text), fields.base_title.clone()),
        ])
    }
}

fn parse_range_bound(raw: &str) -> Result<u32, String> {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    digits
        .parse()
        .map_err(|_| format!("unparsable folder range bound '{}'", raw.trim()))
}

/// Implicit mode: no folder value is supplied; the extent descriptors decide
/// how many rows the component expands into.
fn implicit_rows(
    did: Node,
    ancestors: &[Option<String>; ANCESTOR_SLOTS],
    info: &CollectionInfo,
) -> Vec<FolderRow> {
    let fields = ComponentFields::read(did, ancestors, info);

    match extract::inferred_folder_count(did) {
        Some(count) if count > 1 => (1..=count)
            .map(|position| {
                let title = format!("{} [{} of {}]", fields.base_title, position, count);
                fields.row(None, title)
            })
            .collect(),
        _ => vec![fields.row(None, fields.base_title.clone())],
    }
}

/// Values shared by every row a single component emits, computed once.
struct ComponentFields<'a> {
    info: &'a CollectionInfo,
    ancestors: &'a [Option<String>; ANCESTOR_SLOTS],
    box_number: String,
    container_type: Option<String>,
    base_title: String,
    date: String,
}

impl<'a> ComponentFields<'a> {
    fn read(
        did: Node,
        ancestors: &'a [Option<String>; ANCESTOR_SLOTS],
        info: &'a CollectionInfo,
    ) -> Self {
        Self {
            info,
            ancestors,
            box_number: extract::box_number(did),
            container_type: extract::container_type(did),
            base_title: extract::base_title(did),
            date: extract::folder_date(did),
        }
    }

    fn row(&self, folder: Option<String>, title: String) -> FolderRow {
        FolderRow {
            collection: self.info.collection.clone(),
            call_number: self.info.call_number.clone(),
            box_number: self.box_number.clone(),
            folder,
            container_type: self.container_type.clone(),
            ancestors: self.ancestors.clone(),
            title,
            date: self.date.clone(),
        }
    }
}
