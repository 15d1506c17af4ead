use std::fs;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use labelgene::LabelError;
use labelgene::convert::{self, GenerateOptions, OutputFormat};
use labelgene::filter;
use labelgene::model::{FOLDER_COLUMNS, NumberingMode};
use tempfile::tempdir;

const SAMPLE_EAD: &str = r#"<ead xmlns="urn:isbn:1-931666-22-9">
  <archdesc>
    <did>
      <repository><corpname>Test Repository</corpname></repository>
      <unittitle>Example Papers</unittitle>
      <unitid>MS 100</unitid>
    </did>
    <dsc>
      <c01>
        <did><unitid>1</unitid><unittitle>Correspondence</unittitle></did>
        <c02><did>
          <container type="box">1</container>
          <container type="folder">1-2</container>
          <unittitle>Letters</unittitle>
          <unitdate>1950</unitdate>
        </did></c02>
        <c02><did>
          <container type="box">2</container>
          <container type="folder">3</container>
          <unittitle>Postcards</unittitle>
        </did></c02>
      </c01>
    </dsc>
  </archdesc>
</ead>"#;

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[test]
fn generated_workbook_round_trips_through_calamine() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("example.xml");
    fs::write(&input, SAMPLE_EAD).expect("EAD written");

    let summary = convert::generate(&input, temp_dir.path(), &GenerateOptions::default())
        .expect("tables generated");

    assert_eq!(summary.folder_rows, 3);
    assert_eq!(summary.box_rows, 2);
    assert!(!summary.flagged);
    assert!(
        summary
            .folder_path
            .ends_with("Example Papers_MS 100_folder.xlsx")
    );

    let mut workbook: Xlsx<_> = open_workbook(&summary.folder_path).expect("workbook opened");
    let range = workbook
        .worksheet_range("Folders")
        .expect("folder sheet present")
        .expect("folder sheet read");

    let headers: Vec<String> = range
        .rows()
        .next()
        .expect("header row")
        .iter()
        .map(|cell| cell_to_string(Some(cell)))
        .collect();
    assert_eq!(headers, FOLDER_COLUMNS);

    let first_row: Vec<String> = range
        .rows()
        .nth(1)
        .expect("first data row")
        .iter()
        .map(|cell| cell_to_string(Some(cell)))
        .collect();
    assert_eq!(first_row[0], "Example Papers");
    assert_eq!(first_row[2], "Box 1");
    assert_eq!(first_row[3], "Folder 1");
    assert_eq!(first_row[10], "Letters [1 of 2]");
    assert_eq!(first_row[11], "1950");

    let box_range = {
        let mut workbook: Xlsx<_> = open_workbook(&summary.box_path).expect("workbook opened");
        workbook
            .worksheet_range("Boxes")
            .expect("box sheet present")
            .expect("box sheet read")
    };
    let box_row: Vec<String> = box_range
        .rows()
        .nth(1)
        .expect("first box row")
        .iter()
        .map(|cell| cell_to_string(Some(cell)))
        .collect();
    assert_eq!(box_row[0], "Test Repository");
    assert_eq!(box_row[3], "1");
    assert_eq!(box_row[4], "2 folders");
    assert_eq!(box_row[8], "Series I. Correspondence");
}

#[test]
fn json_output_serializes_rows_with_field_names() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("example.xml");
    fs::write(&input, SAMPLE_EAD).expect("EAD written");

    let options = GenerateOptions {
        format: OutputFormat::Json,
        ..GenerateOptions::default()
    };
    let summary = convert::generate(&input, temp_dir.path(), &options).expect("tables generated");

    let folders: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary.folder_path).expect("JSON read"))
            .expect("JSON parsed");
    let rows = folders.as_array().expect("array of folder rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["box_number"], "Box 1");
    assert_eq!(rows[0]["title"], "Letters [1 of 2]");
    assert_eq!(rows[2]["date"], "Date unavailable");

    let boxes: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary.box_path).expect("JSON read"))
            .expect("JSON parsed");
    assert_eq!(boxes.as_array().expect("array of box rows").len(), 2);
}

#[test]
fn box_selection_restricts_both_tables() {
    let tables =
        convert::build_tables(SAMPLE_EAD, NumberingMode::Continuous).expect("tables built");

    let selected = vec!["2".to_string()];
    let folders = filter::filter_folders_by_box(&tables.folders, &selected);
    let boxes = filter::filter_boxes_by_box(&tables.boxes, &selected);

    assert_eq!(folders.len(), 1);
    assert_eq!(folders.rows[0].box_number, "Box 2");
    assert_eq!(folders.rows[0].title, "Postcards");
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes.rows[0].box_number, "2");
}

#[test]
fn series_selection_matches_lineage_labels() {
    let tables =
        convert::build_tables(SAMPLE_EAD, NumberingMode::Continuous).expect("tables built");

    let selected = vec!["Series I. Correspondence".to_string()];
    let folders = filter::filter_folders_by_series(&tables.folders, &selected);
    let boxes = filter::filter_boxes_by_series(&tables.boxes, &selected);
    assert_eq!(folders.len(), 3);
    assert_eq!(boxes.len(), 2);

    let none = filter::filter_folders_by_series(&tables.folders, &["Other".to_string()]);
    assert!(none.is_empty());
}

#[test]
fn missing_input_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let missing = temp_dir.path().join("absent.xml");

    let result = convert::generate(&missing, temp_dir.path(), &GenerateOptions::default());
    assert!(matches!(result, Err(LabelError::MissingInput(_))));
}
