use serde::Serialize;

/// Column order of the folder table, as consumed by the label templates.
pub const FOLDER_COLUMNS: [&str; 12] = [
    "COLLECTION",
    "CALL_NO.",
    "BOX",
    "FOLDER",
    "CONTAINER_TYPE",
    "C01_ANCESTOR",
    "C02_ANCESTOR",
    "C03_ANCESTOR",
    "C04_ANCESTOR",
    "C05_ANCESTOR",
    "FOLDER TITLE",
    "FOLDER DATES",
];

/// Column order of the box table.
pub const BOX_COLUMNS: [&str; 13] = [
    "REPOSITORY",
    "COLLECTION",
    "CALL_NO.",
    "BOX",
    "FOLDER_COUNT",
    "FIRST_FOLDER",
    "LAST_FOLDER",
    "CONTAINER_TYPE",
    "FIRST_C01_SERIES",
    "SECOND_C01_SERIES",
    "THIRD_C01_SERIES",
    "FOURTH_C01_SERIES",
    "FIFTH_C01_SERIES",
];

/// Number of ancestor columns carried per folder row, and of series columns
/// per box row.
pub const ANCESTOR_SLOTS: usize = 5;

/// Collection-level metadata read once from the top of the finding aid and
/// copied into every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionInfo {
    pub repository: String,
    pub collection: String,
    pub call_number: String,
}

/// Folder numbering preference applied during finalization.
///
/// Only honoured when the source document carries no explicit numbering of
/// its own; explicitly numbered collections are always treated as continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingMode {
    /// Box labels show a FIRST - LAST folder number range.
    Continuous,
    /// Folder numbers restart at 1 in every box; box labels show a count.
    NonContinuous,
}

/// One row of the folder table: a single physical folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderRow {
    pub collection: String,
    pub call_number: String,
    /// Box identifier, or the `"10001"` sentinel when unresolved. Rewritten
    /// once during finalization to carry the "Box " display prefix.
    pub box_number: String,
    /// Folder identifier. Absent until finalization for implicitly numbered
    /// components.
    pub folder: Option<String>,
    /// Container render hint (`altrender`), when the source declares one.
    pub container_type: Option<String>,
    /// Lineage labels, nearest ancestor first, padded to five entries.
    pub ancestors: [Option<String>; ANCESTOR_SLOTS],
    pub title: String,
    pub date: String,
}

impl FolderRow {
    /// Cell values in [`FOLDER_COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.collection.clone(),
            self.call_number.clone(),
            self.box_number.clone(),
            self.folder.clone().unwrap_or_default(),
            self.container_type.clone().unwrap_or_default(),
        ];
        cells.extend(
            self.ancestors
                .iter()
                .map(|value| value.clone().unwrap_or_default()),
        );
        cells.push(self.title.clone());
        cells.push(self.date.clone());
        cells
    }
}

/// One row of the box table: a summary of every folder sharing a box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxRow {
    pub repository: String,
    pub collection: String,
    pub call_number: String,
    /// Bare box identifier; the "Box " prefix is stripped from this table
    /// only, unlike the folder table.
    pub box_number: String,
    /// Human-readable count, e.g. "1 folder" / "12 folders".
    pub folder_count: String,
    /// Lowest folder number in the box (continuous numbering only).
    pub first_folder: Option<u32>,
    /// Highest folder number in the box; absent for single-folder boxes.
    pub last_folder: Option<u32>,
    pub container_type: Option<String>,
    /// Distinct first-ancestor (series) labels seen among the box's folders.
    pub series: [Option<String>; ANCESTOR_SLOTS],
}

impl BoxRow {
    /// Cell values in [`BOX_COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.repository.clone(),
            self.collection.clone(),
            self.call_number.clone(),
            self.box_number.clone(),
            self.folder_count.clone(),
            self.first_folder.map(|n| n.to_string()).unwrap_or_default(),
            self.last_folder.map(|n| n.to_string()).unwrap_or_default(),
            self.container_type.clone().unwrap_or_default(),
        ];
        cells.extend(
            self.series
                .iter()
                .map(|value| value.clone().unwrap_or_default()),
        );
        cells
    }
}

/// The folder table. Populated by sequential append, then rewritten exactly
/// once by the finalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderTable {
    pub rows: Vec<FolderRow>,
    #[serde(skip)]
    pub(crate) finalized: bool,
}

impl FolderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: FolderRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True once the finalizer has prefixed and renumbered this table.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

/// The box table, derived from a finalized folder table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxTable {
    pub rows: Vec<BoxRow>,
}

impl BoxTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
